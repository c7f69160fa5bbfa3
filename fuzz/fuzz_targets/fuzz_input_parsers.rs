#![no_main]

use algoviz_core::input::{limits, parse_array, parse_graph, parse_items};
use algoviz_core::{Algorithm, InputConfig, UserParams, generate};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fuzz_target!(|data: &[u8]| {
    // Host text is arbitrary; the parsers must never panic.
    let text = String::from_utf8_lossy(data);
    let mut rng = SmallRng::seed_from_u64(0);
    let config = InputConfig::default();

    if let Ok(values) = parse_array(&text, &mut rng) {
        assert!(values.len() <= limits::MAX_ARRAY_LEN);
        assert!(
            values
                .iter()
                .all(|v| (limits::CUSTOM_VALUE_MIN..=limits::CUSTOM_VALUE_MAX).contains(v)),
            "value outside the custom range"
        );
    }

    for directed in [false, true] {
        if let Some(graph) = parse_graph(&text, directed) {
            assert!(graph.node_count() <= limits::MAX_GRAPH_NODES);
            assert!(!graph.edges().is_empty());
            for edge in graph.edges() {
                assert!(edge.from < graph.node_count() && edge.to < graph.node_count());
            }
        }
    }

    if let Some(items) = parse_items(&text) {
        assert!((1..=limits::MAX_ITEMS).contains(&items.len()));
    }

    // Whatever the host typed, resolved input must generate a trace.
    let array = UserParams::default().with_custom_array(text.to_string());
    let input = array
        .resolve(Algorithm::QuickSort, &config, &mut rng)
        .expect("custom array resolves");
    generate(Algorithm::QuickSort, &input).expect("sort accepts resolved array");

    let capacity = u32::from(data.first().copied().unwrap_or(0)) % limits::MAX_CAPACITY + 1;
    let knapsack = UserParams {
        items: Some(text.to_string()),
        capacity: Some(capacity),
        ..UserParams::default()
    };
    let input = knapsack
        .resolve(Algorithm::Knapsack, &config, &mut rng)
        .expect("knapsack resolves");
    generate(Algorithm::Knapsack, &input).expect("knapsack accepts resolved items");

    let labels = parse_graph(&text, false)
        .map(|g| g.labels().to_vec())
        .unwrap_or_else(|| vec!["A".to_string()]);
    let (start, end) = (labels[0].clone(), labels[labels.len() - 1].clone());
    let graph = UserParams::default()
        .with_graph(text.to_string())
        .with_endpoints(start, Some(end.as_str()));
    let input = graph
        .resolve(Algorithm::Dijkstra, &config, &mut rng)
        .expect("graph endpoints resolve");
    generate(Algorithm::Dijkstra, &input).expect("dijkstra accepts resolved graph");
});
