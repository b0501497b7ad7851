/// Fanouts the harness has monomorphized trees for.
pub const SUPPORTED_ORDERS: [usize; 7] = [3, 4, 5, 8, 16, 32, 64];

const MAX_TOTAL_KEYS: usize = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// Odd keys `1, 3, 5, ...` in ascending order.
    Sequential,
    /// One random key in `[0, 2 * total_keys)` per odd step.
    Random,
}

impl Default for KeyPattern {
    fn default() -> Self {
        KeyPattern::Sequential
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub total_keys: usize,
    pub pattern: KeyPattern,
    pub seed: Option<u64>,
    pub order: usize,
    pub print_tree: bool,
    pub show_lookups: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            total_keys: 25,
            pattern: KeyPattern::Sequential,
            seed: None,
            order: treemap_core::DEFAULT_ORDER,
            print_tree: false,
            show_lookups: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.total_keys == 0 {
            return Err("total_keys must be at least 1".to_string());
        }

        if self.total_keys > MAX_TOTAL_KEYS {
            return Err(format!("total_keys must be at most {}", MAX_TOTAL_KEYS));
        }

        if !SUPPORTED_ORDERS.contains(&self.order) {
            return Err(format!("order must be one of {:?}", SUPPORTED_ORDERS));
        }

        if self.seed.is_some() && self.pattern != KeyPattern::Random {
            return Err("seed only applies to the random key pattern".to_string());
        }

        Ok(())
    }
}
