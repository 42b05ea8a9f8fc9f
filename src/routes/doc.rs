use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::TokenResponse,
        bookings::{BookingResponse, CreateBookingRequest},
        payments::{ConfirmPaymentRequest, CreateIntentRequest, CreateIntentResponse},
    },
    models::{AdvertisedItem, Bike, Booking, Category, PaymentRecord, User},
    routes::{advertised, auth, bikes, bookings, categories, health, payments, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::issue_token,
        users::upsert_user,
        users::create_user,
        users::list_users,
        users::list_sellers,
        users::is_admin,
        users::is_seller,
        users::is_user,
        users::delete_user,
        categories::list_categories,
        categories::bikes_in_category,
        bikes::create_bike,
        bikes::bikes_by_seller,
        bikes::get_bike,
        bikes::update_bike,
        bikes::delete_bike,
        advertised::advertise,
        advertised::list_advertised,
        bookings::create_booking,
        bookings::bookings_for_buyer,
        bookings::get_booking,
        payments::create_payment_intent,
        payments::confirm_payment,
    ),
    components(
        schemas(
            User,
            Category,
            Bike,
            Booking,
            PaymentRecord,
            AdvertisedItem,
            TokenResponse,
            CreateBookingRequest,
            BookingResponse,
            CreateIntentRequest,
            CreateIntentResponse,
            ConfirmPaymentRequest,
            users::UpsertUserRequest,
            users::CreateUserRequest,
            users::UpsertUserResponse,
            users::RoleFlag,
            bikes::CreateBikeRequest,
            bikes::UpdateBikeRequest,
            advertised::AdvertiseRequest,
            health::HealthData,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Token issuance"),
        (name = "Users", description = "User profiles and role lookups"),
        (name = "Catalog", description = "Categories"),
        (name = "Bikes", description = "Listings"),
        (name = "Bookings", description = "Reservations"),
        (name = "Payments", description = "Payment intents and confirmation"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
