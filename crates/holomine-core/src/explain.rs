//! Plain-language captions for mining patterns.
//!
//! Captions are static strings bundled per algorithm category. They are a
//! display aid only: the generator never inspects pattern contents, and the
//! same `(label, pattern, index)` always yields the same caption.

use serde::{Deserialize, Serialize};

use crate::contract::MiningResult;

/// Explanation family a mining result label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmCategory {
    Clustering,
    Association,
    Classification,
    Outlier,
}

/// Label markers, checked in order; the first match wins.
const LABEL_MARKERS: [(&str, AlgorithmCategory); 4] = [
    ("K-Means", AlgorithmCategory::Clustering),
    ("Association", AlgorithmCategory::Association),
    ("Classification", AlgorithmCategory::Classification),
    ("Outlier", AlgorithmCategory::Outlier),
];

const CLUSTERING_CAPTIONS: &[&str] = &[
    "🎯 This represents a group of SIMILAR customers found in your encrypted data. For example, this could be 'high-income young professionals' - but we can't see their actual details because data is encrypted!",
    "🎯 Another distinct customer group discovered. Maybe 'middle-aged moderate spenders' - the exact pattern is hidden in encryption, but the similarity is detected!",
    "🎯 A third unique group identified. Could be 'senior citizens with low purchase frequency' - grouping happened WITHOUT seeing individual customer information!",
];
const CLUSTERING_FALLBACK: &str =
    "🎯 Another group of similar records identified in the encrypted dataset.";

const ASSOCIATION_CAPTIONS: &[&str] = &[
    "🛒 This shows items that are frequently bought together. Like 'customers who buy bread also buy butter' - but we never saw WHO bought WHAT, only the encrypted pattern!",
    "🛒 Another purchasing pattern discovered. Maybe 'people buying laptops also buy mouse' - relationship found in encrypted shopping data!",
    "🛒 Common item combination detected. Could be 'coffee + sugar frequently together' - pattern exists even in encrypted form!",
    "🛒 Additional shopping pattern identified securely in encrypted transaction data!",
];
const ASSOCIATION_FALLBACK: &str =
    "🛒 Item relationship discovered in encrypted transaction patterns.";

const CLASSIFICATION_CAPTIONS: &[&str] = &[
    "📊 This shows percentage of customers in different categories. Like 45% are 'Premium customers' - classified WITHOUT seeing actual customer data!",
    "📊 Another customer segment identified. Maybe 35% are 'Regular customers' - categorization done on encrypted information!",
    "📊 Additional classification discovered in the encrypted dataset!",
    "📈 This is the accuracy of our classification - how confident we are in the groupings!",
    "📈 Precision and Recall show how well the classification performed on encrypted data!",
    "📈 F1-Score is the overall performance metric - higher is better!",
];
const CLASSIFICATION_FALLBACK: &str = "📊 Classification metric calculated on encrypted data.";

const OUTLIER_CAPTIONS: &[&str] = &[
    "🔍 Total number of encrypted records analyzed - we processed this many without seeing the actual data!",
    "⚠️ These are UNUSUAL records detected - maybe fraudulent transactions or anomalies - found WITHOUT decryption!",
    "📊 The sensitivity threshold used to detect outliers in encrypted space!",
    "📈 Statistical threshold (Z-score) - how many standard deviations from normal to flag as outlier!",
    "✅ Confidence level - how sure we are about outlier detection on encrypted data!",
];
const OUTLIER_FALLBACK: &str = "🔍 Outlier detection metric on encrypted dataset.";

/// Caption for labels that match no known category.
pub const GENERIC_CAPTION: &str =
    "✨ Pattern discovered in encrypted data without exposing original information!";

impl AlgorithmCategory {
    /// Maps a result label to its category by substring match.
    pub fn from_label(label: &str) -> Option<Self> {
        LABEL_MARKERS
            .iter()
            .find(|(marker, _)| label.contains(marker))
            .map(|(_, category)| *category)
    }

    /// Ordered captions for this category.
    pub fn captions(self) -> &'static [&'static str] {
        match self {
            AlgorithmCategory::Clustering => CLUSTERING_CAPTIONS,
            AlgorithmCategory::Association => ASSOCIATION_CAPTIONS,
            AlgorithmCategory::Classification => CLASSIFICATION_CAPTIONS,
            AlgorithmCategory::Outlier => OUTLIER_CAPTIONS,
        }
    }

    /// Caption for indices past the end of [`captions`](Self::captions).
    pub fn fallback(self) -> &'static str {
        match self {
            AlgorithmCategory::Clustering => CLUSTERING_FALLBACK,
            AlgorithmCategory::Association => ASSOCIATION_FALLBACK,
            AlgorithmCategory::Classification => CLASSIFICATION_FALLBACK,
            AlgorithmCategory::Outlier => OUTLIER_FALLBACK,
        }
    }

    pub fn caption(self, index: usize) -> &'static str {
        self.captions()
            .get(index)
            .copied()
            .unwrap_or_else(|| self.fallback())
    }
}

/// Returns the caption for the pattern at `index` of a result labelled `label`.
///
/// Total and pure: unknown labels get [`GENERIC_CAPTION`], indices beyond a
/// category's list get that category's fallback.
pub fn explain(label: &str, _pattern: &str, index: usize) -> &'static str {
    match AlgorithmCategory::from_label(label) {
        Some(category) => category.caption(index),
        None => GENERIC_CAPTION,
    }
}

/// A pattern paired with its display ordinal and caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainedPattern {
    /// 1-based position in the result.
    pub ordinal: usize,
    pub pattern: String,
    pub caption: &'static str,
}

/// Captions every pattern of a mining result, preserving order.
pub fn explain_result(result: &MiningResult) -> Vec<ExplainedPattern> {
    result
        .patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| ExplainedPattern {
            ordinal: index + 1,
            pattern: pattern.clone(),
            caption: explain(&result.algorithm, pattern, index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(
            AlgorithmCategory::from_label("K-Means Clustering (Privacy-Preserving)"),
            Some(AlgorithmCategory::Clustering)
        );
        assert_eq!(
            AlgorithmCategory::from_label("Association Rule Mining (Secure)"),
            Some(AlgorithmCategory::Association)
        );
        assert_eq!(
            AlgorithmCategory::from_label("Privacy-Preserving Classification"),
            Some(AlgorithmCategory::Classification)
        );
        assert_eq!(
            AlgorithmCategory::from_label("Outlier Detection (Encrypted)"),
            Some(AlgorithmCategory::Outlier)
        );
        assert_eq!(AlgorithmCategory::from_label("Decision Trees"), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(AlgorithmCategory::from_label("k-means"), None);
    }

    #[test]
    fn test_first_marker_wins() {
        assert_eq!(
            AlgorithmCategory::from_label("K-Means Outlier Hybrid"),
            Some(AlgorithmCategory::Clustering)
        );
    }

    #[test]
    fn test_k_means_captions_and_fallback() {
        let label = "K-Means Clustering";
        let first = explain(label, "Cluster 1", 0);
        let second = explain(label, "Cluster 2", 1);
        let third = explain(label, "Cluster 3", 2);

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
        assert_eq!(explain(label, "Cluster 4", 3), CLUSTERING_FALLBACK);
        assert_eq!(explain(label, "Cluster 99", 98), CLUSTERING_FALLBACK);
    }

    #[test]
    fn test_pattern_text_does_not_affect_caption() {
        assert_eq!(
            explain("Outlier Detection", "anything", 1),
            explain("Outlier Detection", "something else", 1)
        );
    }

    #[test]
    fn test_caption_counts_per_category() {
        assert_eq!(AlgorithmCategory::Clustering.captions().len(), 3);
        assert_eq!(AlgorithmCategory::Association.captions().len(), 4);
        assert_eq!(AlgorithmCategory::Classification.captions().len(), 6);
        assert_eq!(AlgorithmCategory::Outlier.captions().len(), 5);
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(
            explain("Association Rule Mining", "", 4),
            ASSOCIATION_FALLBACK
        );
        assert_eq!(
            explain("Privacy-Preserving Classification", "", 6),
            CLASSIFICATION_FALLBACK
        );
        assert_eq!(explain("Outlier Detection", "", 5), OUTLIER_FALLBACK);
    }

    #[test]
    fn test_unknown_label_uses_generic_caption() {
        assert_eq!(explain("Mystery Miner", "p", 0), GENERIC_CAPTION);
        assert_eq!(explain("", "p", 7), GENERIC_CAPTION);
    }

    #[test]
    fn test_explain_result_preserves_order() {
        let result = MiningResult {
            algorithm: "K-Means Clustering".to_string(),
            execution_time: 42.0,
            privacy_level: "100%".to_string(),
            patterns: vec![
                "Group 1: ...".to_string(),
                "Group 2: ...".to_string(),
                "Group 3: ...".to_string(),
                "Group 4: ...".to_string(),
            ],
            timestamp: None,
        };

        let explained = explain_result(&result);
        assert_eq!(explained.len(), 4);
        assert_eq!(explained[0].ordinal, 1);
        assert_eq!(explained[0].pattern, "Group 1: ...");
        assert_eq!(explained[0].caption, CLUSTERING_CAPTIONS[0]);
        assert_eq!(explained[3].caption, CLUSTERING_FALLBACK);
    }
}
