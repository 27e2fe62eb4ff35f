/// OpenAPI documentation for the Souk Messaging Service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Souk Messaging Service API",
        version = "1.0.0",
        description = "Buyer-seller conversations and messages for marketplace listings",
        contact(
            name = "Souk Team",
            email = "team@souk.dev"
        ),
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8085", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Service health checks"),
        (name = "Conversations", description = "Conversation listing, lookup and get-or-create"),
        (name = "Messages", description = "Message history and sending"),
    )
)]
pub struct ApiDoc;
