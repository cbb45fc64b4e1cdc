use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered `field -> value` mapping parsed from the client's status
/// output. Serializes as a JSON object that keeps the source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    entries: Vec<(String, String)>,
    malformed: Vec<String>,
}

impl ConnectionStatus {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Lines that carried no `key: value` separator and were skipped.
    #[must_use]
    pub fn malformed_lines(&self) -> &[String] {
        &self.malformed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        // Last write wins, the key keeps its first-seen position.
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

impl Serialize for ConnectionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse colon-delimited `key: value` lines into a [`ConnectionStatus`].
///
/// The whole text is trimmed, each non-empty line is split once on the
/// first colon and both halves are trimmed. Lines without a colon do
/// not fail the query, they are recorded as malformed and skipped.
/// Empty input yields an empty mapping.
#[must_use]
pub fn parse(raw: &str) -> ConnectionStatus {
    let mut status = ConnectionStatus::default();

    for line in raw.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                status.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => status.malformed.push(line.to_string()),
        }
    }

    status
}
