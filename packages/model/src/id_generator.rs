use crate::page::Page;
use crc32fast::Hasher;

/// Generate a page seed from its slug using CRC32
pub fn get_page_seed(slug: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"page://");
    hasher.update(slug.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for sections and components within a page
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Page seed (CRC32)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    pub fn new(slug: &str) -> Self {
        Self {
            seed: get_page_seed(slug),
            count: 0,
        }
    }

    /// Resume after the highest counter already used in `page`
    pub fn for_page(page: &Page) -> Self {
        let mut generator = Self::new(&page.slug);
        let prefix = format!("{}-", generator.seed);

        generator.count = page
            .ids()
            .filter_map(|id| id.strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u64>().ok())
            .filter(|n| *n < u64::MAX)
            .max()
            .unwrap_or(0);

        generator
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
