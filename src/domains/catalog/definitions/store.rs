//! Store resource - orders placed for pets.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::catalog::{Operation, Parameter, ResourceOptions, SharedResource};

pub struct StoreResource;

impl ResourceDefinition for StoreResource {
    const PATH: &'static str = "/store";

    fn options() -> ResourceOptions {
        ResourceOptions::new().model(
            "Order",
            json!({
                "id": "Order",
                "properties": {
                    "id": {"type": "long"},
                    "petId": {"type": "long"},
                    "quantity": {"type": "int"},
                    "shipDate": {"type": "Date"},
                    "status": {"type": "string"}
                }
            }),
        )
    }

    fn declare(resource: &SharedResource) {
        resource.get(
            "/store/order/{orderId}",
            Some("Find purchase order by ID"),
            Operation::new()
                .nickname("getOrderById")
                .response_class("Order")
                .parameter(Parameter::path("orderId", "string"))
                .error_response(404, "Order not found"),
        );
        resource.delete(
            "/store/order/{orderId}",
            Some("Delete purchase order by ID"),
            Operation::new()
                .nickname("deleteOrder")
                .parameter(Parameter::path("orderId", "string")),
        );
        resource.post(
            "/store/order",
            Some("Place an order for a pet"),
            Operation::new()
                .nickname("placeOrder")
                .parameter(Parameter::body("Order"))
                .error_response(400, "Invalid order"),
        );
    }
}
