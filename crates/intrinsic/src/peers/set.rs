//! Ticker to peer-group mapping.

use intrinsic_data::source::normalize_peers;
use intrinsic_data::{PeerSource, Result};
use std::collections::BTreeMap;

const SWISS_BLUE_CHIPS: &[(&str, &[&str])] = &[
    // Consumer staples
    ("NESN.SW", &["BN.PA", "ULVR.L", "PEP", "MDLZ", "KHC"]),
    // Pharma
    ("ROG.SW", &["NOVN.SW", "PFE", "LLY", "NOVO-B.CO", "JNJ"]),
    ("NOVN.SW", &["ROG.SW", "PFE", "LLY", "NOVO-B.CO", "JNJ"]),
    // Luxury
    ("CFR.SW", &["MC.PA", "UHR.SW", "KER.PA", "RMS.PA"]),
    // Insurance
    ("ZURN.SW", &["ALV.DE", "CS.PA", "G.MI"]),
    ("SLHN.SW", &["LGEN.L", "PRU.L", "AGN.AS", "NN.AS"]),
    // Banks
    ("UBSG.SW", &["MS", "JPM", "BAC", "BNP.PA", "DBK.DE"]),
    // Private markets
    ("PGHN.SW", &["BX", "APO", "KKR", "CG", "EQT.ST", "CVC.AS"]),
    // Reinsurance
    ("SREN.SW", &["MUV2.DE", "HNR1.DE", "SCR.PA"]),
];

/// Ordered peer lists keyed by ticker.
///
/// Lists never contain the ticker itself or repeated peers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerSet {
    groups: BTreeMap<String, Vec<String>>,
}

impl PeerSet {
    /// Empty peer set.
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Reference table of Swiss blue chips and their international peers.
    pub fn swiss_blue_chips() -> Self {
        let mut set = Self::new();
        for (ticker, peers) in SWISS_BLUE_CHIPS {
            set.insert(ticker, peers.iter().copied());
        }
        set
    }

    /// Load peer lists for `tickers` from a source.
    ///
    /// Tickers without stored peers are kept with an empty list.
    pub fn from_source<S, I, T>(source: &S, tickers: I) -> Result<Self>
    where
        S: PeerSource + ?Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set = Self::new();
        for ticker in tickers {
            let ticker = ticker.as_ref();
            let peers = source.peers(ticker)?;
            set.insert(ticker, peers);
        }
        Ok(set)
    }

    /// Set the peers of a ticker, replacing any previous list.
    pub fn insert<I, T>(&mut self, ticker: &str, peers: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let raw: Vec<String> = peers.into_iter().map(Into::into).collect();
        self.groups
            .insert(ticker.to_string(), normalize_peers(ticker, &raw));
    }

    /// Peers of a ticker in rank order; empty when unknown.
    pub fn peers_of(&self, ticker: &str) -> &[String] {
        self.groups.get(ticker).map_or(&[], Vec::as_slice)
    }

    /// The ticker followed by its peers.
    pub fn group(&self, ticker: &str) -> Vec<String> {
        std::iter::once(ticker.to_string())
            .chain(self.peers_of(ticker).iter().cloned())
            .collect()
    }

    /// Tickers with a peer list, sorted.
    pub fn tickers(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Whether a peer list exists for `ticker`.
    pub fn contains(&self, ticker: &str) -> bool {
        self.groups.contains_key(ticker)
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no ticker has a peer list.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>, V: IntoIterator<Item = String>> FromIterator<(K, V)> for PeerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (ticker, peers) in iter {
            let ticker: String = ticker.into();
            set.insert(&ticker, peers);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_data::MemoryStore;

    #[test]
    fn test_reference_table() {
        let set = PeerSet::swiss_blue_chips();

        assert_eq!(set.len(), 9);
        assert_eq!(set.peers_of("CFR.SW"), ["MC.PA", "UHR.SW", "KER.PA", "RMS.PA"]);
        assert!(set.peers_of("ROG.SW").contains(&"NOVN.SW".to_string()));
        assert!(set.peers_of("AAPL").is_empty());
    }

    #[test]
    fn test_no_self_reference() {
        let set = PeerSet::swiss_blue_chips();
        for ticker in set.tickers() {
            assert!(!set.peers_of(ticker).iter().any(|p| p == ticker));
        }
    }

    #[test]
    fn test_insert_normalizes() {
        let mut set = PeerSet::new();
        set.insert("ROG.SW", ["PFE", "ROG.SW", "PFE", "LLY"]);

        assert_eq!(set.peers_of("ROG.SW"), ["PFE", "LLY"]);
        assert_eq!(set.group("ROG.SW"), ["ROG.SW", "PFE", "LLY"]);
    }

    #[test]
    fn test_from_source() {
        let store = MemoryStore::new().with_peers("UBSG.SW", &["MS", "JPM"]);
        let set = PeerSet::from_source(&store, ["UBSG.SW", "NESN.SW"]).unwrap();

        assert_eq!(set.peers_of("UBSG.SW"), ["MS", "JPM"]);
        assert!(set.contains("NESN.SW"));
        assert!(set.peers_of("NESN.SW").is_empty());
    }
}
