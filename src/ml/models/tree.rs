use rand::rngs::StdRng;
use rand::seq::index::sample;
use std::cmp::Ordering;

/// Relative size below which an error reduction is rounding noise.
const REL_TOLERANCE: f64 = 1e-12;

/// Growth limits of a single tree, with `max_features` already resolved to a count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    pub max_features: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Number of sorted samples going left.
    left_count: usize,
    gain: f64,
}

/// CART regression tree splitting on squared error.
#[derive(Debug, Clone)]
pub(crate) struct RegressionTree {
    nodes: Vec<Node>,
    /// Total squared-error reduction credited to each feature.
    gains: Vec<f64>,
}

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    params: TreeParams,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
    gains: Vec<f64>,
}

impl RegressionTree {
    /// Grow a tree on the rows listed in `samples` (repeats allowed, as drawn by a bootstrap).
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        samples: Vec<usize>,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let mut builder = Builder {
            x,
            y,
            params,
            rng,
            nodes: Vec::new(),
            gains: vec![0.0; n_features],
        };
        let mut samples = samples;
        builder.grow(&mut samples, 0);

        Self {
            nodes: builder.nodes,
            gains: builder.gains,
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Impurity decrease per feature, normalized to sum to 1 (zeros for a stump).
    pub fn importances(&self) -> Vec<f64> {
        let total: f64 = self.gains.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.gains.len()];
        }
        self.gains.iter().map(|gain| gain / total).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Builder<'_> {
    fn grow(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let (sum, sum_sq) = moments(self.y, samples, 0.0);
        let mean = sum / samples.len() as f64;
        let (_, sse) = moments(self.y, samples, mean);

        let depth_reached = self.params.max_depth.map_or(false, |max| depth >= max);
        let pure = sse <= REL_TOLERANCE * sum_sq.max(1.0);
        if samples.len() < self.params.min_samples_split || depth_reached || pure {
            return self.leaf(mean);
        }

        let Some(best) = self.best_split(samples, mean, sse) else {
            return self.leaf(mean);
        };

        sort_by_feature(self.x, samples, best.feature);
        self.gains[best.feature] += best.gain;

        let index = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });
        let (left_samples, right_samples) = samples.split_at_mut(best.left_count);
        let left = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[index] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        index
    }

    fn leaf(&mut self, value: f64) -> usize {
        self.nodes.push(Node::Leaf { value });
        self.nodes.len() - 1
    }

    /// Targets are centred on the node mean before accumulating.
    fn best_split(
        &mut self,
        samples: &mut [usize],
        mean: f64,
        parent_sse: f64,
    ) -> Option<BestSplit> {
        let n_features = self.gains.len();
        if n_features == 0 {
            return None;
        }
        let k = self.params.max_features.clamp(1, n_features);
        let candidates = sample(&mut *self.rng, n_features, k).into_vec();
        let min_leaf = self.params.min_samples_leaf;
        let n = samples.len();

        let mut best: Option<BestSplit> = None;
        for feature in candidates {
            sort_by_feature(self.x, samples, feature);
            let (total, total_sq) = moments(self.y, samples, mean);

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for i in 0..n - 1 {
                let target = self.y[samples[i]] - mean;
                left_sum += target;
                left_sq += target * target;

                let left_count = i + 1;
                let right_count = n - left_count;
                if left_count < min_leaf || right_count < min_leaf {
                    continue;
                }
                let here = self.x[samples[i]][feature];
                let next = self.x[samples[i + 1]][feature];
                if here >= next {
                    continue;
                }

                let left_sse = left_sq - left_sum * left_sum / left_count as f64;
                let right_sum = total - left_sum;
                let right_sse = (total_sq - left_sq) - right_sum * right_sum / right_count as f64;
                let gain = parent_sse - left_sse - right_sse;

                if gain > REL_TOLERANCE * parent_sse && best.map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: here + (next - here) / 2.0,
                        left_count,
                        gain,
                    });
                }
            }
        }
        best
    }
}

/// Sum and sum of squares of `y - shift` over the sampled rows.
fn moments(y: &[f64], samples: &[usize], shift: f64) -> (f64, f64) {
    samples.iter().fold((0.0, 0.0), |(sum, sum_sq), &i| {
        let value = y[i] - shift;
        (sum + value, sum_sq + value * value)
    })
}

fn sort_by_feature(x: &[Vec<f64>], samples: &mut [usize], feature: usize) {
    samples.sort_by(|&a, &b| {
        x[a][feature]
            .partial_cmp(&x[b][feature])
            .unwrap_or(Ordering::Equal)
    });
}
