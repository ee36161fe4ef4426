/// Public gateways tried, in order, for multiaddress datasets.
pub const DEFAULT_IPFS_GATEWAYS: [&str; 3] = [
  "https://ipfs-gateway.v8-bellecour.iex.ec",
  "https://gateway.ipfs.io",
  "https://gateway.pinata.cloud",
];

/// [`DEFAULT_IPFS_GATEWAYS`] as an owned, ordered list.
pub fn default_gateways() -> Vec<String> {
  DEFAULT_IPFS_GATEWAYS.iter().map(|g| g.to_string()).collect()
}

const CONTENT_PROTOCOLS: [&str; 3] = ["ipfs", "ipns", "p2p"];

/// Whether `url` is a content-addressed reference such as `/ipfs/Qm...`.
///
/// Such references are resolved by prefixing them with a gateway base URL.
pub fn is_multiaddress(url: &str) -> bool {
  let Some(rest) = url.trim().strip_prefix('/') else {
    return false;
  };
  let mut segments = rest.splitn(2, '/');
  let protocol = segments.next().unwrap_or_default();
  let value = segments.next().unwrap_or_default();
  CONTENT_PROTOCOLS.contains(&protocol) && !value.is_empty()
}
