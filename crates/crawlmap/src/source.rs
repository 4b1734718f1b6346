//! Adapter from the crawler's graph endpoint to a layout [`Graph`].
//!
//! The REST layer returns serialized page and link records:
//!
//! ```json
//! {
//!   "nodes": [{ "pk": 1, "fields": { "title": "Home", "crawl_time": "12ms",
//!                                    "url": "https://example.com/", "owner": 5 } }],
//!   "edges": [{ "pk": 9, "fields": { "source": 1, "target": 2 } }]
//! }
//! ```
//!
//! [`GraphResponse::build_graph`] turns that into a [`Graph<PagePayload>`],
//! either one node per page or one node per host depending on [`GraphMode`].

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    config::GraphMode,
    error::{CrawlmapError, GraphError},
    graph::{Graph, GraphBuilder},
};

/// Metadata of a crawled page, passed through the layout untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePayload {
    /// Page URL, or the host in domain mode
    pub url: String,
    /// Crawl timestamp as reported by the crawler
    #[serde(default)]
    pub crawl_time: String,
    /// Id of the website record that owns the page
    pub owner: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// Page lies outside the record's crawl boundary
    #[serde(default)]
    pub boundary_record: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseNode {
    pk: u64,
    fields: PagePayload,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct EdgeFields {
    source: u64,
    target: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseEdge {
    fields: EdgeFields,
}

/// Parsed body of the graph endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphResponse {
    #[serde(default)]
    nodes: Vec<ResponseNode>,
    #[serde(default)]
    edges: Vec<ResponseEdge>,
}

impl GraphResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlmapError::Json`] if the body is not a valid graph
    /// response.
    pub fn from_json(body: &str) -> Result<Self, CrawlmapError> {
        let response: GraphResponse = serde_json::from_str(body)?;
        debug!(
            node_count = response.nodes.len(),
            edge_count = response.edges.len();
            "Parsed graph response"
        );
        Ok(response)
    }

    /// Number of page records in the response
    pub fn page_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of link records in the response
    pub fn link_count(&self) -> usize {
        self.edges.len()
    }

    /// Builds the layout graph for `mode`.
    ///
    /// Links between the same pair of nodes are merged into one edge whose
    /// weight counts the links.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if two pages share a `pk` and
    /// [`GraphError::UnknownNode`] if a link names a page that is absent.
    pub fn build_graph(&self, mode: GraphMode) -> Result<Graph<PagePayload>, GraphError> {
        match mode {
            GraphMode::Website => self.website_graph(),
            GraphMode::Domain => self.domain_graph(),
        }
    }

    fn website_graph(&self) -> Result<Graph<PagePayload>, GraphError> {
        let mut builder = GraphBuilder::new();
        for node in &self.nodes {
            builder.add_node(node.pk.to_string(), node.fields.clone())?;
        }

        let mut links: IndexMap<(String, String), u32> = IndexMap::new();
        for edge in &self.edges {
            let key = (edge.fields.source.to_string(), edge.fields.target.to_string());
            *links.entry(key).or_default() += 1;
        }
        for ((source, target), weight) in links {
            builder.add_edge(&source, &target, weight)?;
        }

        Ok(builder.build())
    }

    fn domain_graph(&self) -> Result<Graph<PagePayload>, GraphError> {
        // pk -> host of the page
        let mut host_of_page: IndexMap<u64, String> = IndexMap::new();
        // host -> payload of the first page seen on it
        let mut hosts: IndexMap<String, PagePayload> = IndexMap::new();

        for node in &self.nodes {
            let host = host_key(&node.fields.url);
            match host_of_page.entry(node.pk) {
                Entry::Occupied(_) => return Err(GraphError::DuplicateNode(node.pk.to_string())),
                Entry::Vacant(entry) => {
                    entry.insert(host.clone());
                }
            }
            hosts.entry(host.clone()).or_insert_with(|| PagePayload {
                url: host,
                ..node.fields.clone()
            });
        }

        let lookup = |edge: &ResponseEdge, pk: u64| {
            host_of_page.get(&pk).ok_or_else(|| GraphError::UnknownNode {
                source_id: edge.fields.source.to_string(),
                target_id: edge.fields.target.to_string(),
                missing: pk.to_string(),
            })
        };

        let mut links: IndexMap<(&str, &str), u32> = IndexMap::new();
        for edge in &self.edges {
            let source = lookup(edge, edge.fields.source)?;
            let target = lookup(edge, edge.fields.target)?;
            if source == target {
                continue;
            }
            *links.entry((source.as_str(), target.as_str())).or_default() += 1;
        }

        trace!(
            page_count = self.nodes.len(),
            host_count = hosts.len(),
            link_count = links.len();
            "Collapsed pages into hosts"
        );

        let mut builder = GraphBuilder::new();
        for (host, payload) in &hosts {
            builder.add_node(host.as_str(), payload.clone())?;
        }
        for ((source, target), weight) in links {
            builder.add_edge(source, target, weight)?;
        }
        Ok(builder.build())
    }
}

/// Returns the network location of `url`, lowercased.
///
/// Mirrors the `netloc` of a URL split: the part after `scheme://` up to the
/// first `/`, `?` or `#`. Scheme-less URLs such as `www.example.com/page`
/// are treated as starting with the host. Falls back to the whole URL when
/// no host can be found.
fn host_key(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..end];

    if host.is_empty() {
        url.to_ascii_lowercase()
    } else {
        host.to_ascii_lowercase()
    }
}
