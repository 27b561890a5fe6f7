//! Network presets: chain ids, default RPC endpoints, premint API names.

/// Default premint registry API base URL.
pub const DEFAULT_PREMINT_API_URL: &str = "https://api.zora.co/premint";

/// Chains the Zora protocol contracts are deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Zora,
    ZoraSepolia,
    Base,
    BaseSepolia,
}

impl Chain {
    pub fn id(&self) -> u64 {
        match self {
            Chain::Zora => 7_777_777,
            Chain::ZoraSepolia => 999_999_999,
            Chain::Base => 8_453,
            Chain::BaseSepolia => 84_532,
        }
    }

    pub fn from_id(id: u64) -> Option<Chain> {
        [Chain::Zora, Chain::ZoraSepolia, Chain::Base, Chain::BaseSepolia]
            .into_iter()
            .find(|c| c.id() == id)
    }

    /// Public JSON-RPC endpoint used when no RPC URL is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Chain::Zora => "https://rpc.zora.energy",
            Chain::ZoraSepolia => "https://sepolia.rpc.zora.energy",
            Chain::Base => "https://mainnet.base.org",
            Chain::BaseSepolia => "https://sepolia.base.org",
        }
    }

    /// Chain identifier the premint API expects in paths and bodies.
    pub fn premint_api_name(&self) -> &'static str {
        match self {
            Chain::Zora => "ZORA-MAINNET",
            Chain::ZoraSepolia => "ZORA-SEPOLIA",
            Chain::Base => "BASE-MAINNET",
            Chain::BaseSepolia => "BASE-SEPOLIA",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Chain::Zora => write!(f, "zora"),
            Chain::ZoraSepolia => write!(f, "zora-sepolia"),
            Chain::Base => write!(f, "base"),
            Chain::BaseSepolia => write!(f, "base-sepolia"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_round_trip() {
        for chain in [Chain::Zora, Chain::ZoraSepolia, Chain::Base, Chain::BaseSepolia] {
            assert_eq!(Chain::from_id(chain.id()), Some(chain));
        }
        assert_eq!(Chain::from_id(1), None);
    }
}
