#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    fn magnitude(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Unit-length copy; a zero vector is returned unchanged.
    pub fn normalized(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return self.clone();
        }
        Self::new(self.values.iter().map(|x| x / magnitude).collect())
    }

    /// Cosine similarity in `[-1, 1]`; `0.0` for mismatched dimensions or zero vectors.
    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.dimensions() != other.dimensions() {
            return 0.0;
        }

        let (magnitude_a, magnitude_b) = (self.magnitude(), other.magnitude());
        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            return 0.0;
        }

        let dot_product: f32 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum();

        dot_product / (magnitude_a * magnitude_b)
    }
}
