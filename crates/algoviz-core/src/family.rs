//! Family selection: mapping free-form algorithm metadata onto a closed set
//! of visualizer families and concrete algorithms.
//!
//! # Invariants
//!
//! 1. [`classify`] is total and deterministic. Unknown metadata falls back to
//!    [`Family::Sorting`].
//! 2. Fields are consulted in order name, category, description. The first
//!    field that matches any rule decides.
//! 3. Within a field, rules are tried graph, dynamic programming, recursion,
//!    searching, sorting. "Breadth first search" is therefore a graph
//!    algorithm, never an array search.
//! 4. Short acronyms (`bfs`, `dfs`, `dp`, `lcs`) only match whole words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UnsupportedFamilyError, ValidationError};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Visualizer family. Determines the generator set and the view shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Sorting,
    Searching,
    Graph,
    Recursion,
    DynamicProgramming,
}

/// A concrete algorithm with a trace generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    QuickSort,
    MergeSort,
    HeapSort,
    LinearSearch,
    BinarySearch,
    JumpSearch,
    ExponentialSearch,
    Bfs,
    Dijkstra,
    FibonacciRecursion,
    FactorialRecursion,
    FibonacciTable,
    Knapsack,
    Lcs,
}

/// Host-supplied description of an algorithm entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmMetadata {
    pub name: String,
    pub category: String,
    pub description: String,
}

impl AlgorithmMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn fields(&self) -> [&str; 3] {
        [&self.name, &self.category, &self.description]
    }
}

// ---------------------------------------------------------------------------
// Family
// ---------------------------------------------------------------------------

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Sorting,
        Family::Searching,
        Family::Graph,
        Family::Recursion,
        Family::DynamicProgramming,
    ];

    /// Algorithms that belong to this family, default first.
    #[must_use]
    pub fn algorithms(self) -> &'static [Algorithm] {
        use Algorithm::*;
        match self {
            Family::Sorting => &[
                BubbleSort,
                SelectionSort,
                InsertionSort,
                QuickSort,
                MergeSort,
                HeapSort,
            ],
            Family::Searching => &[LinearSearch, BinarySearch, JumpSearch, ExponentialSearch],
            Family::Graph => &[Bfs, Dijkstra],
            Family::Recursion => &[FibonacciRecursion, FactorialRecursion],
            Family::DynamicProgramming => &[FibonacciTable, Knapsack, Lcs],
        }
    }

    /// The algorithm shown when metadata names none in particular.
    #[must_use]
    pub fn default_algorithm(self) -> Algorithm {
        self.algorithms()[0]
    }

    #[must_use]
    pub fn supports(self, algorithm: Algorithm) -> bool {
        algorithm.family() == self
    }

    /// Reject an algorithm that this family cannot visualize.
    pub fn ensure_supports(self, algorithm: Algorithm) -> Result<(), UnsupportedFamilyError> {
        if self.supports(algorithm) {
            Ok(())
        } else {
            Err(UnsupportedFamilyError {
                algorithm,
                family: self,
            })
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Family::Sorting => "Sorting",
            Family::Searching => "Searching",
            Family::Graph => "Graph",
            Family::Recursion => "Recursion",
            Family::DynamicProgramming => "Dynamic Programming",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

impl Algorithm {
    pub const ALL: [Algorithm; 17] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::QuickSort,
        Algorithm::MergeSort,
        Algorithm::HeapSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::JumpSearch,
        Algorithm::ExponentialSearch,
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::FibonacciRecursion,
        Algorithm::FactorialRecursion,
        Algorithm::FibonacciTable,
        Algorithm::Knapsack,
        Algorithm::Lcs,
    ];

    #[must_use]
    pub fn family(self) -> Family {
        use Algorithm::*;
        match self {
            BubbleSort | SelectionSort | InsertionSort | QuickSort | MergeSort | HeapSort => {
                Family::Sorting
            }
            LinearSearch | BinarySearch | JumpSearch | ExponentialSearch => Family::Searching,
            Bfs | Dijkstra => Family::Graph,
            FibonacciRecursion | FactorialRecursion => Family::Recursion,
            FibonacciTable | Knapsack | Lcs => Family::DynamicProgramming,
        }
    }

    /// Stable snake_case key, matching the serde representation.
    #[must_use]
    pub fn key(self) -> &'static str {
        use Algorithm::*;
        match self {
            BubbleSort => "bubble_sort",
            SelectionSort => "selection_sort",
            InsertionSort => "insertion_sort",
            QuickSort => "quick_sort",
            MergeSort => "merge_sort",
            HeapSort => "heap_sort",
            LinearSearch => "linear_search",
            BinarySearch => "binary_search",
            JumpSearch => "jump_search",
            ExponentialSearch => "exponential_search",
            Bfs => "bfs",
            Dijkstra => "dijkstra",
            FibonacciRecursion => "fibonacci_recursion",
            FactorialRecursion => "factorial_recursion",
            FibonacciTable => "fibonacci_table",
            Knapsack => "knapsack",
            Lcs => "lcs",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        use Algorithm::*;
        match self {
            BubbleSort => "Bubble Sort",
            SelectionSort => "Selection Sort",
            InsertionSort => "Insertion Sort",
            QuickSort => "Quick Sort",
            MergeSort => "Merge Sort",
            HeapSort => "Heap Sort",
            LinearSearch => "Linear Search",
            BinarySearch => "Binary Search",
            JumpSearch => "Jump Search",
            ExponentialSearch => "Exponential Search",
            Bfs => "Breadth-First Search",
            Dijkstra => "Dijkstra's Algorithm",
            FibonacciRecursion => "Fibonacci (Recursive)",
            FactorialRecursion => "Factorial (Recursive)",
            FibonacciTable => "Fibonacci (Tabulation)",
            Knapsack => "0/1 Knapsack",
            Lcs => "Longest Common Subsequence",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.key() == key)
            .ok_or_else(|| ValidationError::invalid("algorithm", format!("unknown key {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Keyword matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Substring of the normalized text.
    Phrase(&'static str),
    /// Whole word of the normalized text.
    Word(&'static str),
}

use Pattern::{Phrase, Word};

const GRAPH_RULES: &[Pattern] = &[
    Word("bfs"),
    Word("dfs"),
    Phrase("breadth first"),
    Phrase("depth first"),
    Phrase("dijkstra"),
    Phrase("shortest path"),
    Phrase("minimum spanning"),
    Phrase("topological"),
    Phrase("graph"),
];

const DP_RULES: &[Pattern] = &[
    Phrase("dynamic programming"),
    Word("dp"),
    Phrase("memoiz"),
    Phrase("tabulation"),
    Phrase("knapsack"),
    Phrase("longest common subsequence"),
    Word("lcs"),
];

const RECURSION_RULES: &[Pattern] = &[
    Phrase("recurs"),
    Phrase("factorial"),
    Phrase("fibonacci"),
    Phrase("hanoi"),
    Phrase("backtrack"),
];

const SEARCH_RULES: &[Pattern] = &[Phrase("search")];

const SORT_RULES: &[Pattern] = &[Phrase("sort")];

const FAMILY_RULES: [(Family, &[Pattern]); 5] = [
    (Family::Graph, GRAPH_RULES),
    (Family::DynamicProgramming, DP_RULES),
    (Family::Recursion, RECURSION_RULES),
    (Family::Searching, SEARCH_RULES),
    (Family::Sorting, SORT_RULES),
];

/// Lowercase, non-alphanumerics folded to single spaces, padded by one space
/// on each side so whole-word checks are plain substring checks.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    if !out.ends_with(' ') {
        out.push(' ');
    }
    out
}

fn matches(normalized: &str, pattern: Pattern) -> bool {
    match pattern {
        Phrase(p) => normalized.contains(p),
        Word(w) => normalized.contains(&format!(" {w} ")),
    }
}

fn matches_any(normalized: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| matches(normalized, *p))
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Classify metadata into a family.
#[must_use]
pub fn classify(metadata: &AlgorithmMetadata) -> Family {
    for field in metadata.fields() {
        let normalized = normalize(field);
        for (family, rules) in FAMILY_RULES {
            if matches_any(&normalized, rules) {
                return family;
            }
        }
    }
    Family::Sorting
}

const ALGORITHM_RULES: &[(Algorithm, &[Pattern])] = &[
    (Algorithm::SelectionSort, &[Phrase("selection")]),
    (Algorithm::InsertionSort, &[Phrase("insertion")]),
    (Algorithm::QuickSort, &[Phrase("quick"), Phrase("partition")]),
    (Algorithm::MergeSort, &[Phrase("merge")]),
    (Algorithm::HeapSort, &[Phrase("heap")]),
    (Algorithm::BubbleSort, &[Phrase("bubble")]),
    (Algorithm::BinarySearch, &[Phrase("binary")]),
    (Algorithm::JumpSearch, &[Phrase("jump")]),
    (Algorithm::ExponentialSearch, &[Phrase("exponential")]),
    (Algorithm::LinearSearch, &[Phrase("linear"), Phrase("sequential")]),
    (Algorithm::Dijkstra, &[Phrase("dijkstra"), Phrase("shortest path")]),
    (Algorithm::Bfs, &[Word("bfs"), Phrase("breadth first")]),
    (Algorithm::FactorialRecursion, &[Phrase("factorial")]),
    (Algorithm::FibonacciRecursion, &[Phrase("fibonacci")]),
    (Algorithm::Knapsack, &[Phrase("knapsack")]),
    (Algorithm::Lcs, &[Phrase("longest common subsequence"), Word("lcs")]),
    (Algorithm::FibonacciTable, &[Phrase("fibonacci")]),
];

/// Pick the concrete algorithm inside `family` that best matches the
/// metadata, falling back to the family default.
#[must_use]
pub fn select_algorithm(family: Family, metadata: &AlgorithmMetadata) -> Algorithm {
    for field in metadata.fields() {
        let normalized = normalize(field);
        for (algorithm, rules) in ALGORITHM_RULES {
            if algorithm.family() == family && matches_any(&normalized, rules) {
                return *algorithm;
            }
        }
    }
    family.default_algorithm()
}

/// Classify and pick an algorithm in one pass.
#[must_use]
pub fn resolve(metadata: &AlgorithmMetadata) -> (Family, Algorithm) {
    let family = classify(metadata);
    let algorithm = select_algorithm(family, metadata);
    tracing::debug!(
        name = %metadata.name,
        family = %family,
        algorithm = algorithm.key(),
        "resolved algorithm metadata"
    );
    (family, algorithm)
}
