//! Infrastructure implementation of the `HostEnumerator` port.

use anyhow::Result;

use crate::application::ports::HostEnumerator;
use crate::domain::config::ProvisionerConfig;

/// Host list fixed up front: the current machine followed by its peers.
///
/// Duplicates are dropped, keeping the first occurrence.
pub struct StaticHosts {
    machines: Vec<String>,
}

impl StaticHosts {
    #[must_use]
    pub fn new(current: &str, peers: &[String]) -> Self {
        let mut machines = vec![current.to_string()];
        for peer in peers {
            if !machines.contains(peer) {
                machines.push(peer.clone());
            }
        }
        Self { machines }
    }
}

impl HostEnumerator for StaticHosts {
    fn machines(&self, _config: &ProvisionerConfig) -> Result<Vec<String>> {
        Ok(self.machines.clone())
    }
}
