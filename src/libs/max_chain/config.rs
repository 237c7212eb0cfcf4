/// Run-time knobs of [`max_chain`](super::max_chain).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    /// Most sequences a single call accepts
    pub max_dimensions: usize,
    /// Box-count ceiling for the bounding step; 0 disables bounding
    pub max_boxes: u64,
    /// Skip the chain entirely when more boxes than this remain
    pub box_limit: Option<u64>,
    /// Seed for the bounding step's tie-breaking shuffle
    pub seed: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            max_dimensions: 5,
            max_boxes: 0,
            box_limit: None,
            seed: 0,
        }
    }
}

impl ChainConfig {
    pub fn with_max_dimensions(mut self, max_dimensions: usize) -> Self {
        self.max_dimensions = max_dimensions;
        self
    }

    pub fn with_max_boxes(mut self, max_boxes: u64) -> Self {
        self.max_boxes = max_boxes;
        self
    }

    pub fn with_box_limit(mut self, box_limit: Option<u64>) -> Self {
        self.box_limit = box_limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
