//! Pet resource - the sample catalog's main resource.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::catalog::{Operation, Parameter, ResourceOptions, SharedResource};

pub struct PetsResource;

impl ResourceDefinition for PetsResource {
    const PATH: &'static str = "/pet";

    fn options() -> ResourceOptions {
        ResourceOptions::new()
            .model(
                "Pet",
                json!({
                    "id": "Pet",
                    "properties": {
                        "id": {"type": "long"},
                        "name": {"type": "string"},
                        "category": {"type": "Category"},
                        "tags": {"type": "Array", "items": {"$ref": "Tag"}},
                        "status": {
                            "type": "string",
                            "allowableValues": {
                                "valueType": "LIST",
                                "values": ["available", "pending", "sold"]
                            }
                        }
                    }
                }),
            )
            .model(
                "Category",
                json!({
                    "id": "Category",
                    "properties": {"id": {"type": "long"}, "name": {"type": "string"}}
                }),
            )
            .model(
                "Tag",
                json!({
                    "id": "Tag",
                    "properties": {"id": {"type": "long"}, "name": {"type": "string"}}
                }),
            )
    }

    fn declare(resource: &SharedResource) {
        resource.describe("/pet/{petId}", "Operations about a single pet");
        resource.get(
            "/pet/{petId}",
            Some("Find pet by ID"),
            Operation::new()
                .nickname("getPetById")
                .response_class("Pet")
                .notes("Returns a pet based on ID")
                .parameter(Parameter::path("petId", "string").description("ID of pet to fetch"))
                .error_response(400, "Invalid ID supplied")
                .error_response(404, "Pet not found"),
        );
        resource.delete(
            "/pet/{petId}",
            Some("Deletes a pet"),
            Operation::new()
                .nickname("deletePet")
                .parameter(Parameter::path("petId", "string").description("Pet id to delete"))
                .error_response(400, "Invalid pet value"),
        );

        resource.post(
            "/pet",
            Some("Add a new pet to the store"),
            Operation::new()
                .nickname("addPet")
                .parameter(Parameter::body("Pet").description("Pet object to add"))
                .error_response(405, "Invalid input"),
        );
        resource.put(
            "/pet",
            Some("Update an existing pet"),
            Operation::new()
                .nickname("updatePet")
                .parameter(Parameter::body("Pet").description("Pet object that needs to be updated"))
                .error_response(400, "Invalid ID supplied")
                .error_response(404, "Pet not found")
                .error_response(405, "Validation exception"),
        );

        resource.get(
            "/pet/findByStatus",
            Some("Finds pets by status"),
            Operation::new()
                .nickname("findPetsByStatus")
                .response_class("List[Pet]")
                .notes("Multiple status values can be provided with comma-separated strings")
                .parameter(
                    Parameter::query("status", "string")
                        .required(true)
                        .allow_multiple(true)
                        .allowable_values(json!({
                            "valueType": "LIST",
                            "values": ["available", "pending", "sold"]
                        })),
                )
                .error_response(400, "Invalid status value"),
        );
    }
}
