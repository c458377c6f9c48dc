/// What an asset is used for in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRole {
    Constituent,
    Benchmark,
}

/// A symbol referenced by return series columns and weight entries.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    pub symbol: String,
    pub role: AssetRole,
}

impl Asset {
    pub fn constituent(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            role: AssetRole::Constituent,
        }
    }

    pub fn benchmark(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            role: AssetRole::Benchmark,
        }
    }

    pub fn is_benchmark(&self) -> bool {
        self.role == AssetRole::Benchmark
    }
}

impl std::fmt::Debug for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Asset {{ symbol: {}, role: {:?} }}", self.symbol, self.role)
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        let nifty = Asset::benchmark("^NSEI");
        let infy = Asset::constituent("INFY.NS");
        assert!(nifty.is_benchmark());
        assert!(!infy.is_benchmark());
        assert_eq!(format!("{}", infy), "INFY.NS");
        assert_eq!(
            format!("{:?}", nifty),
            "Asset { symbol: ^NSEI, role: Benchmark }"
        );
    }
}
