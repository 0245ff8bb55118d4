//! Feature vectors shared by the semantic matcher and the risk classifier

/// Fixed-size f32 feature vector.
///
/// Doubles as an embedding vector (semantic layer) and as the 4-dim audit
/// risk feature row, so the similarity math lives in one place.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeatureVector {
    data: Vec<f32>,
}

impl FeatureVector {
    /// Create a zeroed vector with the given dimension
    pub fn new(dim: usize) -> Self {
        Self { data: vec![0.0; dim] }
    }

    /// Create from slice
    pub fn from_slice(data: &[f32]) -> Self {
        Self { data: data.to_vec() }
    }

    /// Set feature at index (out-of-range writes are ignored)
    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        if index < self.data.len() {
            self.data[index] = value;
        }
    }

    /// Get feature at index (0.0 when out of range)
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.data.get(index).copied().unwrap_or(0.0)
    }

    /// Dimension
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Raw slice access
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &FeatureVector) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// L2 normalize in place
    pub fn l2_normalize(&mut self) {
        let norm: f32 = self.data.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 1e-3 {
            for x in &mut self.data {
                *x /= norm;
            }
        }
    }

    /// Cosine similarity; 0.0 when either vector is near-zero
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f32 {
        let dot = self.dot(other);
        let norm_a: f32 = self.data.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = other.data.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a > 1e-3 && norm_b > 1e-3 {
            dot / (norm_a * norm_b)
        } else {
            0.0
        }
    }
}
