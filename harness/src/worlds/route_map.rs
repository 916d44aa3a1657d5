//! `RouteMap`: shortest-route problems over a weighted road graph.
//!
//! States are city names. An action is the name of the city driven to, and
//! its step cost is the road length. A per-city heuristic table (straight-line
//! distance to the goal) is optional; when present it also drives the value
//! function as its negation, so beam search and local search prefer cities
//! closer to the goal.

use std::collections::BTreeMap;

use lodestar_search::contract::{Problem, Successor};

/// Weighted directed road graph with a fixed start and goal city.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMap {
    start: String,
    goal: String,
    roads: BTreeMap<String, Vec<(String, f64)>>,
    estimates: BTreeMap<String, f64>,
}

impl RouteMap {
    /// Empty map routing from `start` to `goal`.
    #[must_use]
    pub fn new(start: &str, goal: &str) -> Self {
        Self {
            start: start.to_owned(),
            goal: goal.to_owned(),
            roads: BTreeMap::new(),
            estimates: BTreeMap::new(),
        }
    }

    /// Add a one-way road. Roads out of a city are offered in insertion order.
    #[must_use]
    pub fn with_road(mut self, from: &str, to: &str, length: f64) -> Self {
        self.roads
            .entry(from.to_owned())
            .or_default()
            .push((to.to_owned(), length));
        self
    }

    /// Add a road usable in both directions.
    #[must_use]
    pub fn with_two_way_road(self, a: &str, b: &str, length: f64) -> Self {
        self.with_road(a, b, length).with_road(b, a, length)
    }

    /// Record the estimated remaining distance from `city` to the goal.
    #[must_use]
    pub fn with_estimate(mut self, city: &str, estimate: f64) -> Self {
        self.estimates.insert(city.to_owned(), estimate);
        self
    }

    /// Same roads and estimates, different endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, start: &str, goal: &str) -> Self {
        start.clone_into(&mut self.start);
        goal.clone_into(&mut self.goal);
        self
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Every city named by a road, sorted.
    #[must_use]
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self
            .roads
            .iter()
            .flat_map(|(from, out)| {
                std::iter::once(from.as_str()).chain(out.iter().map(|(to, _)| to.as_str()))
            })
            .collect();
        cities.sort_unstable();
        cities.dedup();
        cities
    }

    /// `A -> B (1) -> C (1)`, start `A`, goal `C`.
    #[must_use]
    pub fn chain() -> Self {
        Self::new("A", "C")
            .with_road("A", "B", 1.0)
            .with_road("B", "C", 1.0)
    }

    /// The Romania road map from Arad to Bucharest, with straight-line
    /// distances to Bucharest as estimates.
    ///
    /// The cheapest route is Arad, Sibiu, Rimnicu Vilcea, Pitesti, Bucharest
    /// (418). The shallowest is Arad, Sibiu, Fagaras, Bucharest (450).
    #[must_use]
    pub fn romania() -> Self {
        let roads: [(&str, &str, f64); 23] = [
            ("Arad", "Zerind", 75.0),
            ("Arad", "Sibiu", 140.0),
            ("Arad", "Timisoara", 118.0),
            ("Bucharest", "Urziceni", 85.0),
            ("Bucharest", "Pitesti", 101.0),
            ("Bucharest", "Giurgiu", 90.0),
            ("Bucharest", "Fagaras", 211.0),
            ("Craiova", "Drobeta", 120.0),
            ("Craiova", "Rimnicu Vilcea", 146.0),
            ("Craiova", "Pitesti", 138.0),
            ("Drobeta", "Mehadia", 75.0),
            ("Eforie", "Hirsova", 86.0),
            ("Fagaras", "Sibiu", 99.0),
            ("Hirsova", "Urziceni", 98.0),
            ("Iasi", "Vaslui", 92.0),
            ("Iasi", "Neamt", 87.0),
            ("Lugoj", "Timisoara", 111.0),
            ("Lugoj", "Mehadia", 70.0),
            ("Oradea", "Zerind", 71.0),
            ("Oradea", "Sibiu", 151.0),
            ("Pitesti", "Rimnicu Vilcea", 97.0),
            ("Rimnicu Vilcea", "Sibiu", 80.0),
            ("Urziceni", "Vaslui", 142.0),
        ];
        let straight_line: [(&str, f64); 20] = [
            ("Arad", 366.0),
            ("Bucharest", 0.0),
            ("Craiova", 160.0),
            ("Drobeta", 242.0),
            ("Eforie", 161.0),
            ("Fagaras", 176.0),
            ("Giurgiu", 77.0),
            ("Hirsova", 151.0),
            ("Iasi", 226.0),
            ("Lugoj", 244.0),
            ("Mehadia", 241.0),
            ("Neamt", 234.0),
            ("Oradea", 380.0),
            ("Pitesti", 100.0),
            ("Rimnicu Vilcea", 193.0),
            ("Sibiu", 253.0),
            ("Timisoara", 329.0),
            ("Urziceni", 80.0),
            ("Vaslui", 199.0),
            ("Zerind", 374.0),
        ];

        let map = roads
            .iter()
            .fold(Self::new("Arad", "Bucharest"), |map, &(a, b, length)| {
                map.with_two_way_road(a, b, length)
            });
        straight_line
            .iter()
            .fold(map, |map, &(city, estimate)| map.with_estimate(city, estimate))
    }
}

impl Problem for RouteMap {
    type State = String;
    type Action = String;

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn successors(&self, state: &String) -> Vec<Successor<String, String>> {
        self.roads
            .get(state)
            .map(|out| {
                out.iter()
                    .map(|(to, length)| Successor::new(to.clone(), to.clone(), *length))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_goal(&self, state: &String) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, state: &String) -> Option<f64> {
        self.estimates.get(state).copied()
    }

    fn value(&self, state: &String) -> Option<f64> {
        self.heuristic(state).map(|h| -h)
    }
}
