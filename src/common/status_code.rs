use axum::http::StatusCode as HttpStatusCode;
use strum_macros::{Display, EnumIter};

/// HTTP status codes a controller may answer with.
///
/// `Display` yields the variant name (`"NotFound"`), which doubles as the
/// machine-readable error code in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum StatusCode {
    Ok,
    Created,
    Accepted,
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::Accepted => 202,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::Conflict => 409,
            StatusCode::UnprocessableEntity => 422,
            StatusCode::TooManyRequests => 429,
            StatusCode::InternalServerError => 500,
            StatusCode::ServiceUnavailable => 503,
        }
    }
}

impl From<StatusCode> for HttpStatusCode {
    fn from(status: StatusCode) -> Self {
        HttpStatusCode::from_u16(status.as_u16()).unwrap_or(HttpStatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_code_maps_to_the_same_http_status() {
        for status in StatusCode::iter() {
            let http: HttpStatusCode = status.into();
            assert_eq!(http.as_u16(), status.as_u16(), "{status}");
        }
    }

    #[test]
    fn display_is_the_variant_name() {
        assert_eq!(StatusCode::Created.to_string(), "Created");
        assert_eq!(StatusCode::NotFound.to_string(), "NotFound");
    }
}
