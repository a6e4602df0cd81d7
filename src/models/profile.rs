//! Profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Body metrics for a user, at most one document per user.
///
/// Created lazily on the first profile write and updated in place after
/// that. `weight_kg` stays unset when the user never entered one; the
/// 70 kg default applies only inside the calorie estimator, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user ID (also used as document ID)
    pub user_id: String,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}
