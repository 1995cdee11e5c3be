//! Therapist lookup tool: web search formatted for the user.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::search::SearchProvider;

use super::Tool;

/// Fixed reply when the search provider fails. The error never escapes this tool.
const SEARCH_UNAVAILABLE: &str =
    "I'm having trouble searching right now. Please try again later.";

/// Find licensed therapists near a location via web search.
pub struct FindTherapists {
    search: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl FindTherapists {
    pub fn new(search: Arc<dyn SearchProvider>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for FindTherapists {
    fn name(&self) -> &str {
        "find_nearby_therapists_by_location"
    }

    fn description(&self) -> &str {
        "Search for licensed therapists near the specified location and return top results with titles, snippets, and links. Use this if the user asks about nearby therapists or if recommending local professional help would be beneficial."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or area in which the user is seeking therapy support"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let location = args["location"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'location' argument"))?;

        let query = format!("licensed therapists near {} contact number", location);

        // Fail-soft: any provider error becomes a normal-looking reply.
        let results = match self.search.search(&query, self.max_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "therapist search failed");
                return Ok(SEARCH_UNAVAILABLE.to_string());
            }
        };

        if results.is_empty() {
            return Ok(format!(
                "I couldn't find therapists near {}. Please try again.",
                location
            ));
        }

        let blocks = results
            .iter()
            .enumerate()
            .map(|(idx, r)| format!("{}. {}\n{}\n{}", idx + 1, r.title, r.snippet, r.link))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!(
            "Here are some therapists near {}:\n\n{}",
            location, blocks
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchResult;

    struct StubSearch {
        outcome: Result<Vec<SearchResult>, String>,
    }

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(
            &self,
            query: &str,
            _max_results: usize,
        ) -> anyhow::Result<Vec<SearchResult>> {
            assert!(query.starts_with("licensed therapists near "));
            match &self.outcome {
                Ok(results) => Ok(results.clone()),
                Err(msg) => Err(anyhow::anyhow!("{}", msg)),
            }
        }
    }

    fn hits(n: usize) -> Vec<SearchResult> {
        (1..=n)
            .map(|i| SearchResult {
                title: format!("Therapy Practice {}", i),
                snippet: format!("Licensed counselors, office {}", i),
                link: format!("https://practice{}.example", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn formats_numbered_blocks() {
        for n in 1..=5 {
            let tool = FindTherapists::new(
                Arc::new(StubSearch {
                    outcome: Ok(hits(n)),
                }),
                5,
            );
            let out = tool
                .execute(json!({"location": "Boston"}))
                .await
                .expect("results");

            assert!(out.starts_with("Here are some therapists near Boston:"));
            let blocks: Vec<&str> = out
                .split("\n\n")
                .skip(1) // header
                .collect();
            assert_eq!(blocks.len(), n);
            for (idx, block) in blocks.iter().enumerate() {
                let mut lines = block.lines();
                assert!(lines
                    .next()
                    .expect("title line")
                    .starts_with(&format!("{}. Therapy Practice", idx + 1)));
                assert!(lines.next().expect("snippet line").contains("counselors"));
                assert!(lines.next().expect("link line").starts_with("https://"));
            }
        }
    }

    #[tokio::test]
    async fn zero_results_names_the_location() {
        let tool = FindTherapists::new(Arc::new(StubSearch { outcome: Ok(vec![]) }), 5);
        let out = tool
            .execute(json!({"location": "Nowhereville"}))
            .await
            .expect("message");
        assert_eq!(
            out,
            "I couldn't find therapists near Nowhereville. Please try again."
        );
    }

    #[tokio::test]
    async fn provider_errors_never_propagate() {
        let tool = FindTherapists::new(
            Arc::new(StubSearch {
                outcome: Err("connection reset".to_string()),
            }),
            5,
        );
        let out = tool
            .execute(json!({"location": "Boston"}))
            .await
            .expect("fail-soft reply");
        assert_eq!(out, SEARCH_UNAVAILABLE);
    }
}
