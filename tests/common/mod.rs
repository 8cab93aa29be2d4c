use cavern_core::{GridState, Rule, SeedPolicy, SimulationEngine};

/// Fluent construction of engines for integration tests.
#[allow(dead_code)]
pub struct EngineBuilder {
    width: u16,
    height: u16,
    rule: Rule,
    policy: SeedPolicy,
    pattern: Option<String>,
}

#[allow(dead_code)]
impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            width: 32,
            height: 32,
            rule: Rule::cave(),
            policy: SeedPolicy::seeded(0),
            pattern: None,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.policy.seed = Some(seed);
        self
    }

    pub fn with_fill_probability(mut self, p: f64) -> Self {
        self.policy.fill_probability = p;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    /// Starts from a text pattern instead of a random fill.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn build(self) -> SimulationEngine {
        match self.pattern {
            Some(pattern) => {
                let grid = GridState::from_pattern(&pattern).expect("invalid test pattern");
                SimulationEngine::from_grid(grid, self.rule, self.policy)
            }
            None => SimulationEngine::new(self.width, self.height, self.rule, self.policy)
                .expect("Failed to create engine in test builder"),
        }
    }
}

/// Renders a snapshot as `#`/`.` rows for readable assertions.
#[allow(dead_code)]
pub fn pattern_of(engine: &SimulationEngine) -> String {
    engine
        .snapshot()
        .rows()
        .map(|row| {
            row.iter()
                .map(|c| if c.is_occupied() { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
