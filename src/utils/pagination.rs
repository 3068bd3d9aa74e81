use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{Uri, request::Parts},
};

use usersvc_core::{LinkBase, Pageable, PageableParams};

/// Page request read from the query string, plus the base used to build
/// navigation links back to the same endpoint.
///
/// Never rejects: absent or unparseable values fall back to the defaults.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub pageable: Pageable,
    pub links: LinkBase,
}

impl PageRequest {
    pub fn from_uri(uri: &Uri) -> Self {
        let params: PageableParams = uri
            .query()
            .and_then(|query| serde_urlencoded::from_str(query).ok())
            .unwrap_or_default();

        Self {
            pageable: params.into(),
            links: LinkBase::from_path_and_query(uri.path(), uri.query()),
        }
    }
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Nested routers strip their prefix from `parts.uri`.
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(&parts.uri);

        Ok(Self::from_uri(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_page_and_size() {
        let uri: Uri = "/api/v1/users/pages?page=3&size=10".parse().unwrap();
        let request = PageRequest::from_uri(&uri);

        assert_eq!(request.pageable.page, 3);
        assert_eq!(request.pageable.size, 10);
        assert_eq!(
            request.links.page_link(2),
            "/api/v1/users/pages?page=2&size=10"
        );
    }

    #[test]
    fn test_defaults_without_query() {
        let uri: Uri = "/api/v1/roles/pages".parse().unwrap();
        let request = PageRequest::from_uri(&uri);

        assert_eq!(request.pageable, Pageable::default());
    }

    #[test]
    fn test_garbage_values_fall_back_to_defaults() {
        let uri: Uri = "/api/v1/roles/pages?page=abc&size=-5".parse().unwrap();
        let request = PageRequest::from_uri(&uri);

        assert_eq!(request.pageable.page, 1);
        assert_eq!(request.pageable.size, 10);
    }
}
