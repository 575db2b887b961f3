use std::collections::HashSet;

const SEED_SCHEME: &str = "doc://";

/// Stable short seed for a document name: CRC32 of `doc://<name>`, in hex
pub fn get_document_seed(name: &str) -> String {
    let key = if name.starts_with(SEED_SCHEME) {
        name.to_string()
    } else {
        format!("{SEED_SCHEME}{name}")
    };
    format!("{:x}", crc32fast::hash(key.as_bytes()))
}

/// Sequential block id generator for one document.
///
/// Every id handed out or observed is remembered, so ids loaded from JSON and ids
/// generated afterwards never collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
    taken: HashSet<String>,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self::from_seed(get_document_seed(name))
    }

    pub fn from_seed(seed: String) -> Self {
        Self {
            seed,
            count: 0,
            taken: HashSet::new(),
        }
    }

    /// Generate next unused id
    pub fn new_id(&mut self) -> String {
        loop {
            self.count += 1;
            let id = format!("block-{}-{}", self.seed, self.count);
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Record an id that entered the document from elsewhere (JSON load)
    pub fn observe(&mut self, id: &str) {
        self.taken.insert(id.to_string());
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
