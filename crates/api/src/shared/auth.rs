use crate::error::TriplineError;
use actix_web::HttpRequest;
use tripline_infra::TriplineContext;

fn parse_authtoken_header(token_header_value: &str) -> String {
    let mut token = token_header_value.replace("Bearer", "");
    token = token.replace("bearer", "");
    String::from(token.trim())
}

/// The `/api/v1` routes are called by the application frontend server side
/// with the instance api key in the `Authorization` header.
pub fn protect_route(http_req: &HttpRequest, ctx: &TriplineContext) -> Result<(), TriplineError> {
    let api_key = match http_req.headers().get("Authorization") {
        Some(header_value) => match header_value.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(TriplineError::Unauthorized(
                    "Malformed api key in Authorization header".into(),
                ))
            }
        },
        None => {
            return Err(TriplineError::Unauthorized(
                "Missing api key in Authorization header".into(),
            ))
        }
    };

    if api_key == ctx.config.api_secret_key {
        Ok(())
    } else {
        Err(TriplineError::Unauthorized(
            "Invalid api key in Authorization header".into(),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use tripline_infra::TriplineContext;

    fn ctx_with_key(key: &str) -> TriplineContext {
        let mut ctx = TriplineContext::create_inmemory();
        ctx.config.api_secret_key = key.into();
        ctx
    }

    #[test]
    fn accepts_valid_api_key() {
        let ctx = ctx_with_key("valid-key");
        for header in ["valid-key", "Bearer valid-key", "bearer valid-key"].iter() {
            let req = TestRequest::default()
                .insert_header(("Authorization", *header))
                .to_http_request();
            assert!(protect_route(&req, &ctx).is_ok());
        }
    }

    #[test]
    fn rejects_missing_or_invalid_api_key() {
        let ctx = ctx_with_key("valid-key");

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", "other-key"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).is_err());
    }
}
