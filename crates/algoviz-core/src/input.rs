//! User input: typed generator inputs, host parameters, and the text
//! grammars used to parse them.
//!
//! # Grammars
//!
//! ```text
//! array  := int ("," int)*
//! graph  := entry ("," entry)*
//! entry  := LABEL "-" LABEL [":" weight] | LABEL
//! items  := weight ":" value ("," weight ":" value)*
//! ```
//!
//! # Failure Modes
//!
//! - Array tokens that fail to parse are replaced by a generated value and
//!   all custom values are clamped to `1..=100`. Tokens past
//!   [`limits::MAX_ARRAY_LEN`] are dropped.
//! - Malformed graph entries, out-of-range weights, and labels beyond
//!   [`limits::MAX_GRAPH_NODES`] are skipped. If no edge remains, a graph
//!   is generated.
//! - Malformed or out-of-range knapsack items fall back to the default
//!   item set.
//! - Typed numeric parameters (`n`, `capacity`, `target`) are never
//!   repaired. Out-of-range values are [`ValidationError`]s.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::InputConfig;
use crate::error::ValidationError;
use crate::family::{Algorithm, Family};
use crate::graph::{GraphSpec, NodeId};

/// Validation bounds.
pub mod limits {
    pub const MAX_ARRAY_LEN: usize = 100;
    pub const CUSTOM_VALUE_MIN: i64 = 1;
    pub const CUSTOM_VALUE_MAX: i64 = 100;
    pub const MAX_RECURSION_N: u32 = 10;
    pub const MAX_FIB_TABLE_N: u32 = 30;
    pub const MIN_CAPACITY: u32 = 1;
    pub const MAX_CAPACITY: u32 = 20;
    pub const MAX_ITEMS: usize = 10;
    pub const MAX_ITEM_VALUE: i64 = 1000;
    pub const MAX_LCS_LEN: usize = 20;
    pub const MAX_GRAPH_NODES: usize = 26;
    pub const MIN_EDGE_WEIGHT: i64 = 1;
    pub const MAX_EDGE_WEIGHT: i64 = 1000;
}

/// Default knapsack items as `(weight, value)`.
pub const DEFAULT_ITEMS: [Item; 4] = [
    Item::new(2, 6),
    Item::new(3, 10),
    Item::new(4, 12),
    Item::new(5, 15),
];
pub const DEFAULT_CAPACITY: u32 = 10;
pub const DEFAULT_LCS: [&str; 2] = ["ABCBDAB", "BDCABA"];

// ---------------------------------------------------------------------------
// Typed input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: u32,
    pub value: i64,
}

impl Item {
    #[must_use]
    pub const fn new(weight: u32, value: i64) -> Self {
        Self { weight, value }
    }
}

/// Validated-shape input handed to a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum TraceInput {
    Array {
        values: Vec<i64>,
        target: Option<i64>,
    },
    Graph {
        graph: GraphSpec,
        start: Option<NodeId>,
        end: Option<NodeId>,
    },
    Number {
        n: u32,
    },
    Knapsack {
        capacity: u32,
        items: Vec<Item>,
    },
    Strings {
        strings: Vec<String>,
    },
}

impl TraceInput {
    #[must_use]
    pub fn array(values: impl Into<Vec<i64>>) -> Self {
        Self::Array {
            values: values.into(),
            target: None,
        }
    }

    #[must_use]
    pub fn search(values: impl Into<Vec<i64>>, target: i64) -> Self {
        Self::Array {
            values: values.into(),
            target: Some(target),
        }
    }

    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Array { .. } => "array",
            Self::Graph { .. } => "graph",
            Self::Number { .. } => "number",
            Self::Knapsack { .. } => "knapsack",
            Self::Strings { .. } => "strings",
        }
    }
}

// ---------------------------------------------------------------------------
// Host parameters
// ---------------------------------------------------------------------------

/// Where array input comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMode {
    #[default]
    Random,
    Sorted,
    Custom,
}

/// Untyped parameters as a host form would supply them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserParams {
    /// Explicit values; wins over `array_mode`.
    pub values: Option<Vec<i64>>,
    pub array_mode: ArrayMode,
    /// Text for [`ArrayMode::Custom`].
    pub array: Option<String>,
    pub target: Option<i64>,
    pub graph: Option<String>,
    pub directed: bool,
    pub start: Option<String>,
    pub end: Option<String>,
    pub strings: Vec<String>,
    pub n: Option<u32>,
    pub capacity: Option<u32>,
    pub items: Option<String>,
}

impl UserParams {
    #[must_use]
    pub fn with_values(mut self, values: impl Into<Vec<i64>>) -> Self {
        self.values = Some(values.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: i64) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_custom_array(mut self, text: impl Into<String>) -> Self {
        self.array_mode = ArrayMode::Custom;
        self.array = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_graph(mut self, text: impl Into<String>) -> Self {
        self.graph = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, start: impl Into<String>, end: Option<&str>) -> Self {
        self.start = Some(start.into());
        self.end = end.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_strings<S: Into<String>>(mut self, strings: impl IntoIterator<Item = S>) -> Self {
        self.strings = strings.into_iter().map(Into::into).collect();
        self
    }

    /// Turn host parameters into generator input for `algorithm`.
    ///
    /// Missing optional data is generated from `rng`; missing required data
    /// (graph endpoints) is an error.
    pub fn resolve(
        &self,
        algorithm: Algorithm,
        config: &InputConfig,
        rng: &mut SmallRng,
    ) -> Result<TraceInput, ValidationError> {
        match algorithm.family() {
            Family::Sorting => Ok(TraceInput::Array {
                values: self.resolve_array(config, rng)?,
                target: None,
            }),
            Family::Searching => {
                let values = self.resolve_array(config, rng)?;
                if values.is_empty() {
                    return Err(ValidationError::empty("array"));
                }
                let target = match self.target {
                    Some(target) => target,
                    None => values[rng.random_range(0..values.len())],
                };
                Ok(TraceInput::Array {
                    values,
                    target: Some(target),
                })
            }
            Family::Graph => {
                let parsed = self
                    .graph
                    .as_deref()
                    .and_then(|t| parse_graph(t, self.directed));
                let graph = match parsed {
                    Some(graph) => graph,
                    None => {
                        if self.graph.is_some() {
                            tracing::warn!(input = "graph", "no valid edges, generating a graph");
                        }
                        random_graph(config.default_graph_nodes, self.directed, rng)
                    }
                };
                let start = self
                    .start
                    .as_deref()
                    .map(|label| graph.require_node(label))
                    .transpose()?;
                let end = self
                    .end
                    .as_deref()
                    .map(|label| graph.require_node(label))
                    .transpose()?;
                Ok(TraceInput::Graph { graph, start, end })
            }
            Family::Recursion => Ok(TraceInput::Number {
                n: self.n.unwrap_or(5),
            }),
            Family::DynamicProgramming => match algorithm {
                Algorithm::Knapsack => Ok(TraceInput::Knapsack {
                    capacity: self.capacity.unwrap_or(DEFAULT_CAPACITY),
                    items: self.resolve_items(),
                }),
                Algorithm::Lcs => Ok(TraceInput::Strings {
                    strings: if self.strings.is_empty() {
                        DEFAULT_LCS.iter().map(|s| (*s).to_string()).collect()
                    } else {
                        self.strings.clone()
                    },
                }),
                _ => Ok(TraceInput::Number {
                    n: self.n.unwrap_or(10),
                }),
            },
        }
    }

    fn resolve_array(
        &self,
        config: &InputConfig,
        rng: &mut SmallRng,
    ) -> Result<Vec<i64>, ValidationError> {
        if let Some(values) = &self.values {
            return Ok(values.clone());
        }
        match self.array_mode {
            ArrayMode::Random => Ok(random_array(config, rng)),
            ArrayMode::Sorted => {
                let mut values = random_array(config, rng);
                values.sort_unstable();
                Ok(values)
            }
            ArrayMode::Custom => match self.array.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => parse_array(text, rng),
                _ => {
                    tracing::warn!(input = "array", "custom array is blank, generating values");
                    Ok(random_array(config, rng))
                }
            },
        }
    }

    fn resolve_items(&self) -> Vec<Item> {
        match self.items.as_deref() {
            None => DEFAULT_ITEMS.to_vec(),
            Some(text) => parse_items(text).unwrap_or_else(|| {
                tracing::warn!(input = "items", "malformed knapsack items, using defaults");
                DEFAULT_ITEMS.to_vec()
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a comma-separated array. Unparseable tokens become random values;
/// every value is clamped to the custom range. At most
/// [`limits::MAX_ARRAY_LEN`] tokens are kept.
pub fn parse_array(text: &str, rng: &mut SmallRng) -> Result<Vec<i64>, ValidationError> {
    let mut tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() > limits::MAX_ARRAY_LEN {
        tracing::warn!(
            input = "array",
            tokens = tokens.len(),
            kept = limits::MAX_ARRAY_LEN,
            "custom array too long, truncating"
        );
        tokens.truncate(limits::MAX_ARRAY_LEN);
    }
    let values = tokens
        .into_iter()
        .map(|token| match token.parse::<i64>() {
            Ok(v) => v.clamp(limits::CUSTOM_VALUE_MIN, limits::CUSTOM_VALUE_MAX),
            Err(_) => rng.random_range(limits::CUSTOM_VALUE_MIN..=limits::CUSTOM_VALUE_MAX),
        })
        .collect();
    Ok(values)
}

/// Parse `A-B:3, B-C` style edge lists. Returns `None` if no edge survives.
#[must_use]
pub fn parse_graph(text: &str, directed: bool) -> Option<GraphSpec> {
    let mut graph = GraphSpec::new(directed);
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (pair, weight) = match entry.split_once(':') {
            Some((pair, w)) => match w.trim().parse::<u32>() {
                Ok(w) => (pair, w),
                Err(_) => continue,
            },
            None => (entry, 1),
        };
        if !(limits::MIN_EDGE_WEIGHT..=limits::MAX_EDGE_WEIGHT).contains(&i64::from(weight)) {
            continue;
        }
        match pair.split_once('-') {
            Some((a, b)) => {
                let (a, b) = (a.trim(), b.trim());
                if !is_label(a) || !is_label(b) || !has_room(&graph, &[a, b]) {
                    continue;
                }
                let from = graph.intern(a);
                let to = graph.intern(b);
                if graph.add_edge(from, to, weight).is_err() {
                    continue;
                }
            }
            None if is_label(pair.trim()) && has_room(&graph, &[pair.trim()]) => {
                graph.intern(pair.trim());
            }
            None => continue,
        }
    }
    (!graph.edges().is_empty()).then_some(graph)
}

fn is_label(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

/// Whether interning `labels` keeps the graph within the node limit.
fn has_room(graph: &GraphSpec, labels: &[&str]) -> bool {
    let mut new = 0;
    for (i, label) in labels.iter().enumerate() {
        if graph.node_id(label).is_none() && !labels[..i].contains(label) {
            new += 1;
        }
    }
    graph.node_count() + new <= limits::MAX_GRAPH_NODES
}

/// Parse `weight:value` pairs. Any malformed or out-of-range entry rejects
/// the whole list.
#[must_use]
pub fn parse_items(text: &str) -> Option<Vec<Item>> {
    let items: Option<Vec<Item>> = text
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|entry| {
            let (w, v) = entry.split_once(':')?;
            let item = Item::new(w.trim().parse().ok()?, v.trim().parse().ok()?);
            let valid = item.weight >= 1 && (0..=limits::MAX_ITEM_VALUE).contains(&item.value);
            valid.then_some(item)
        })
        .collect();
    items.filter(|items| (1..=limits::MAX_ITEMS).contains(&items.len()))
}

// ---------------------------------------------------------------------------
// Generated inputs
// ---------------------------------------------------------------------------

#[must_use]
pub fn random_array(config: &InputConfig, rng: &mut SmallRng) -> Vec<i64> {
    let len = config.default_array_len.clamp(1, limits::MAX_ARRAY_LEN);
    (0..len)
        .map(|_| rng.random_range(config.value_min..=config.value_max))
        .collect()
}

/// Lettered graph where each node links to 1–3 others with weights 1–10.
#[must_use]
pub fn random_graph(nodes: usize, directed: bool, rng: &mut SmallRng) -> GraphSpec {
    let nodes = nodes.clamp(1, limits::MAX_GRAPH_NODES);
    let mut graph = GraphSpec::lettered(nodes, directed);
    if nodes < 2 {
        return graph;
    }
    for from in 0..nodes {
        let links = rng.random_range(1..=3);
        for _ in 0..links {
            let to = rng.random_range(0..nodes);
            let exists = graph
                .edges()
                .iter()
                .any(|e| (e.from == from && e.to == to) || (e.from == to && e.to == from));
            if to == from || exists {
                continue;
            }
            let weight = rng.random_range(1..=10);
            // Endpoints and weight are in range by construction.
            let _ = graph.add_edge(from, to, weight);
        }
    }
    tracing::debug!(nodes, edges = graph.edges().len(), "generated graph");
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn custom_array_clamps_and_fills_bad_tokens() {
        let values = parse_array("5, 300, -4, abc, 42", &mut rng()).unwrap();
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], 5);
        assert_eq!(values[1], 100);
        assert_eq!(values[2], 1);
        assert!((1..=100).contains(&values[3]));
        assert_eq!(values[4], 42);
    }

    #[test]
    fn custom_array_truncates_oversized_input() {
        let text = vec!["7"; 150].join(",");
        let values = parse_array(&text, &mut rng()).unwrap();
        assert_eq!(values.len(), limits::MAX_ARRAY_LEN);
        assert!(values.iter().all(|&v| v == 7));
    }

    #[test]
    fn oversized_custom_array_still_sorts() {
        let params = UserParams::default().with_custom_array(vec!["3"; 101].join(","));
        let input = params
            .resolve(Algorithm::BubbleSort, &InputConfig::default(), &mut rng())
            .unwrap();
        assert!(crate::generate::generate(Algorithm::BubbleSort, &input).is_ok());
    }

    #[test]
    fn graph_grammar_defaults_weight_and_skips_garbage() {
        let g = parse_graph("A-B:4, B-C, ??, C-D:x, E", false).unwrap();
        assert_eq!(g.labels(), ["A", "B", "C", "E"]);
        assert_eq!(g.edges().len(), 2);
        assert_eq!(g.edges()[0].weight, 4);
        assert_eq!(g.edges()[1].weight, 1);
        assert!(parse_graph(" , ,", false).is_none());
        assert!(parse_graph("A, B", false).is_none());
    }

    #[test]
    fn graph_skips_heavy_edges_before_interning() {
        assert!(parse_graph("A-B:5000", false).is_none());
        let g = parse_graph("A-B:5000, C-D:1000", false).unwrap();
        assert_eq!(g.labels(), ["C", "D"]);
        assert!(parse_graph("A-B:0", false).is_none());
    }

    #[test]
    fn graph_stops_adding_nodes_at_the_limit() {
        let text = (0..=limits::MAX_GRAPH_NODES)
            .map(|i| format!("N{i}-N{}", i + 1))
            .collect::<Vec<_>>()
            .join(",");
        let g = parse_graph(&text, true).unwrap();
        assert_eq!(g.node_count(), limits::MAX_GRAPH_NODES);
        assert_eq!(g.edges().len(), limits::MAX_GRAPH_NODES - 1);

        let params = UserParams::default()
            .with_graph(text)
            .with_endpoints("N0", None);
        let input = params
            .resolve(Algorithm::Bfs, &InputConfig::default(), &mut rng())
            .unwrap();
        assert!(crate::generate::generate(Algorithm::Bfs, &input).is_ok());
    }

    #[test]
    fn heavy_graph_falls_back_to_generated() {
        let config = InputConfig::default();
        let params = UserParams::default()
            .with_graph("A-B:5000")
            .with_endpoints("A", None);
        let TraceInput::Graph { graph, start, .. } =
            params.resolve(Algorithm::Bfs, &config, &mut rng()).unwrap()
        else {
            panic!("expected graph input");
        };
        assert_eq!(graph, random_graph(config.default_graph_nodes, false, &mut rng()));
        assert_eq!(start, Some(0));
    }

    #[test]
    fn items_grammar_is_all_or_nothing() {
        assert_eq!(
            parse_items("1:2, 3:4"),
            Some(vec![Item::new(1, 2), Item::new(3, 4)])
        );
        assert_eq!(parse_items("1:2, 3"), None);
        assert_eq!(parse_items(""), None);
    }

    #[test]
    fn items_outside_bounds_are_rejected() {
        let max = limits::MAX_ITEM_VALUE;
        assert_eq!(parse_items(&format!("1:{max}")), Some(vec![Item::new(1, max)]));
        assert_eq!(parse_items(&format!("1:{}", max + 1)), None);
        assert_eq!(parse_items("1:-1"), None);
        assert_eq!(parse_items("0:5"), None);
        assert_eq!(parse_items(&vec!["1:1"; 11].join(",")), None);
    }

    #[test]
    fn huge_item_values_fall_back_to_defaults() {
        let params = UserParams {
            items: Some("1:9223372036854775807,1:9223372036854775807".into()),
            capacity: Some(2),
            ..UserParams::default()
        };
        let input = params
            .resolve(Algorithm::Knapsack, &InputConfig::default(), &mut rng())
            .unwrap();
        assert_eq!(
            input,
            TraceInput::Knapsack {
                capacity: 2,
                items: DEFAULT_ITEMS.to_vec()
            }
        );
        assert!(crate::generate::generate(Algorithm::Knapsack, &input).is_ok());
    }

    #[test]
    fn random_inputs_are_reproducible_per_seed() {
        let config = InputConfig::default();
        assert_eq!(random_array(&config, &mut rng()), random_array(&config, &mut rng()));
        assert_eq!(random_graph(8, false, &mut rng()), random_graph(8, false, &mut rng()));
    }

    #[test]
    fn random_graph_has_no_self_loops_or_duplicates() {
        let g = random_graph(8, false, &mut rng());
        assert_eq!(g.node_count(), 8);
        for (i, e) in g.edges().iter().enumerate() {
            assert_ne!(e.from, e.to);
            assert!((1..=10).contains(&e.weight));
            for other in &g.edges()[i + 1..] {
                assert!(!(other.from == e.from && other.to == e.to));
                assert!(!(other.from == e.to && other.to == e.from));
            }
        }
    }

    #[test]
    fn resolve_search_picks_target_from_array() {
        let params = UserParams::default().with_values(vec![4, 8, 15]);
        let input = params
            .resolve(Algorithm::BinarySearch, &InputConfig::default(), &mut rng())
            .unwrap();
        let TraceInput::Array { values, target } = input else {
            panic!("expected array input");
        };
        assert!(values.contains(&target.unwrap()));
    }

    #[test]
    fn resolve_sorted_mode_generates_sorted_values() {
        let params = UserParams {
            array_mode: ArrayMode::Sorted,
            ..UserParams::default()
        };
        let config = InputConfig::default().with_default_array_len(12);
        let TraceInput::Array { values, .. } =
            params.resolve(Algorithm::BubbleSort, &config, &mut rng()).unwrap()
        else {
            panic!("expected array input");
        };
        assert_eq!(values.len(), 12);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn resolve_graph_maps_labels_and_rejects_unknown() {
        let params = UserParams::default()
            .with_graph("A-B,B-C")
            .with_endpoints("C", Some("A"));
        let input = params
            .resolve(Algorithm::Dijkstra, &InputConfig::default(), &mut rng())
            .unwrap();
        assert!(matches!(
            input,
            TraceInput::Graph {
                start: Some(2),
                end: Some(0),
                ..
            }
        ));

        let params = UserParams::default().with_graph("A-B").with_endpoints("Z", None);
        assert_eq!(
            params.resolve(Algorithm::Bfs, &InputConfig::default(), &mut rng()),
            Err(ValidationError::UnknownNode { label: "Z".into() })
        );
    }

    #[test]
    fn resolve_dp_defaults() {
        let config = InputConfig::default();
        let input = UserParams::default()
            .resolve(Algorithm::Knapsack, &config, &mut rng())
            .unwrap();
        assert_eq!(
            input,
            TraceInput::Knapsack {
                capacity: DEFAULT_CAPACITY,
                items: DEFAULT_ITEMS.to_vec()
            }
        );
        let input = UserParams::default()
            .resolve(Algorithm::Lcs, &config, &mut rng())
            .unwrap();
        assert_eq!(input.shape(), "strings");
    }
}
