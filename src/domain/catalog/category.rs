//! Item categories. Static reference data maintained out of band.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CategoryId;

/// A browsing category such as "Electronics" or "Costumes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_with_slug() {
        let category = Category {
            id: CategoryId::new(),
            name: "Electronics".to_string(),
            slug: "electronics".to_string(),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["name"], "Electronics");
        assert_eq!(json["slug"], "electronics");
    }
}
