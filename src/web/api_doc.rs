use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::hours::HoursResponse;
use super::api::iss::IssResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::hours::hours,
        super::api::iss::iss,
    ),
    components(
        schemas(
            HoursResponse,
            IssResponse,
            ErrorResponse,
            crate::overhead::GeoPoint,
        )
    ),
    info(
        title = "ISS Overhead API",
        description = "Estimated time until the ISS passes over a location",
        version = "0.1.0"
    ),
    tags(
        (name = "overhead", description = "Overhead time estimates and satellite position")
    )
)]
pub struct ApiDoc;
