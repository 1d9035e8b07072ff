//! Related-person resolution: partial stubs → display-ready wiki links.

use async_trait::async_trait;

use crate::error::Error;
use crate::links::build_link;
use crate::types::{FullPersonRecord, PersonStub, StubKind};

/// Lookup collaborator for stubs that carry only an id.
///
/// Injected rather than captured so the resolver is testable with a stub and
/// owns no transport state of its own.
#[async_trait]
pub trait PersonFetcher: Send + Sync {
    async fn fetch_person(&self, id: i64) -> Result<FullPersonRecord, Error>;
}

/// Resolve stubs into quoted wiki links, preserving source order.
///
/// Stubs with a name link directly. Id-only stubs go through `fetcher`, one
/// outstanding fetch at a time, so total request volume stays proportional to
/// the stub count and output order never needs a re-sort. A failed fetch or a
/// blank fetched name skips just that stub; skipped stubs are omitted from the
/// output, so it may be shorter than the input.
pub async fn resolve_all(
    stubs: &[PersonStub],
    folder: &str,
    fetcher: Option<&dyn PersonFetcher>,
) -> Vec<String> {
    let mut links = Vec::new();

    for stub in stubs {
        match stub.kind() {
            StubKind::NameAndId | StubKind::NameOnly => {
                let name = stub.name.as_deref().unwrap_or_default();
                if let Some(link) = build_link(name, stub.id, folder) {
                    links.push(link);
                }
            }
            StubKind::IdOnly => {
                let (Some(fetcher), Some(id)) = (fetcher, stub.id) else {
                    continue;
                };
                match fetcher.fetch_person(id).await {
                    Ok(full) => {
                        let name = full.name.as_deref().unwrap_or_default();
                        if let Some(link) = build_link(name, Some(id), folder) {
                            links.push(link);
                        }
                    }
                    Err(err) => {
                        log::warn!("related-person lookup failed for id {}: {}", id, err);
                    }
                }
            }
            StubKind::Empty => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapFetcher {
        persons: std::collections::HashMap<i64, FullPersonRecord>,
    }

    #[async_trait]
    impl PersonFetcher for MapFetcher {
        async fn fetch_person(&self, id: i64) -> Result<FullPersonRecord, Error> {
            self.persons.get(&id).cloned().ok_or(Error::Api {
                status: 404,
                message: format!("person {} not found", id),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PersonFetcher for FailingFetcher {
        async fn fetch_person(&self, _id: i64) -> Result<FullPersonRecord, Error> {
            Err(Error::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn stub(id: Option<i64>, name: Option<&str>) -> PersonStub {
        PersonStub {
            id,
            name: name.map(str::to_string),
        }
    }

    fn person(id: i64, name: Option<&str>) -> FullPersonRecord {
        FullPersonRecord {
            id,
            name: name.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_named_stubs_link_without_fetching() {
        let stubs = vec![
            stub(Some(1), Some("Ann Lee")),
            stub(None, Some("Bob Ray")),
        ];
        let links = resolve_all(&stubs, "People", None).await;
        assert_eq!(
            links,
            vec![
                "\"[[People/1|Ann Lee]]\"".to_string(),
                "\"[[People/Bob Ray]]\"".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_id_only_stub_fetches_name() {
        let fetcher = MapFetcher {
            persons: [(5, person(5, Some("Ann")))].into_iter().collect(),
        };
        let links = resolve_all(&[stub(Some(5), None)], "People", Some(&fetcher as &dyn PersonFetcher)).await;
        assert_eq!(links, vec!["\"[[People/5|Ann]]\"".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_only_that_stub() {
        let fetcher = MapFetcher {
            persons: [(7, person(7, Some("Cay")))].into_iter().collect(),
        };
        let stubs = vec![
            stub(Some(1), Some("Ann")),
            stub(Some(404), None), // not in the map, lookup fails
            stub(Some(7), None),
        ];
        let links = resolve_all(&stubs, "", Some(&fetcher as &dyn PersonFetcher)).await;
        assert_eq!(
            links,
            vec!["\"[[1|Ann]]\"".to_string(), "\"[[7|Cay]]\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_rejection_yields_empty() {
        let links = resolve_all(&[stub(Some(5), None)], "F", Some(&FailingFetcher as &dyn PersonFetcher)).await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_id_only_without_fetcher_is_skipped() {
        let links = resolve_all(&[stub(Some(5), None)], "F", None).await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_blank_fetched_name_is_skipped() {
        let fetcher = MapFetcher {
            persons: [(5, person(5, Some("   ")))].into_iter().collect(),
        };
        let links = resolve_all(&[stub(Some(5), None)], "F", Some(&fetcher as &dyn PersonFetcher)).await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_empty_stubs_are_skipped() {
        let stubs = vec![stub(None, None), stub(None, Some("  "))];
        let links = resolve_all(&stubs, "People", None).await;
        assert!(links.is_empty());
    }
}
