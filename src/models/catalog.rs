//! Static service reference data: the review service list, the priced
//! service menu shown on the services page, and the deposit table used
//! by the appointment flow.

/// Services a review can be filed against. Order matters: per-service
/// averages are reported in this order.
pub const KNOWN_SERVICES: [&str; 8] = [
    "Hair Cut",
    "Highlights",
    "Color",
    "Treatments",
    "Basic Cut",
    "Layered Cut",
    "Full Color",
    "Balayage",
];

pub fn is_known_service(name: &str) -> bool {
    KNOWN_SERVICES.contains(&name)
}

/// One bookable service on the services page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedService {
    pub name: &'static str,
    pub price: u32,
    pub info: &'static str,
}

/// A category card with its service list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub title: &'static str,
    pub services: &'static [PricedService],
}

pub const CATEGORIES: [Category; 4] = [
    Category {
        id: "hair-cut",
        title: "Hair Cut",
        services: &[
            PricedService { name: "Basic Cut", price: 25, info: "A clean, classic cut" },
            PricedService { name: "Layered Cut", price: 40, info: "Layers for volume and movement" },
            PricedService { name: "Kids Cut", price: 18, info: "Quick and gentle, ages 12 and under" },
        ],
    },
    Category {
        id: "color",
        title: "Color",
        services: &[
            PricedService { name: "Full Color", price: 70, info: "Single-process color, root to tip" },
            PricedService { name: "Root Touch-Up", price: 45, info: "Regrowth color match" },
            PricedService { name: "Gloss & Toner", price: 30, info: "Shine and tone refresh" },
            PricedService { name: "Color Correction", price: 140, info: "Fixing what went wrong elsewhere" },
        ],
    },
    Category {
        id: "highlights",
        title: "Highlights",
        services: &[
            PricedService { name: "Partial Highlights", price: 60, info: "Face-framing brightness" },
            PricedService { name: "Full Highlights", price: 90, info: "All-over dimension" },
            PricedService { name: "Balayage", price: 120, info: "Hand-painted, natural grow-out" },
            PricedService { name: "Babylights", price: 110, info: "Ultra-fine, subtle highlights" },
        ],
    },
    Category {
        id: "treatments",
        title: "Treatments",
        services: &[
            PricedService { name: "Deep Conditioning", price: 35, info: "Moisture restore" },
            PricedService { name: "Keratin Smoothing", price: 180, info: "Long-lasting frizz control" },
            PricedService { name: "Scalp Detox", price: 45, info: "Clarifying scalp reset" },
            PricedService { name: "Protein Rebuild", price: 55, info: "Strength for damaged hair" },
        ],
    },
];

/// A service eligible for an appointment deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositOption {
    pub id: &'static str,
    pub name: &'static str,
    pub deposit: u32,
}

pub const DEPOSIT_OPTIONS: [DepositOption; 3] = [
    DepositOption { id: "hair-color", name: "Hair Color", deposit: 50 },
    DepositOption { id: "highlights", name: "Highlights", deposit: 75 },
    DepositOption { id: "cut-and-style", name: "Cut & Style", deposit: 30 },
];

pub fn deposit_for(service_id: &str) -> Option<DepositOption> {
    DEPOSIT_OPTIONS.iter().copied().find(|o| o.id == service_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_services_match_the_review_filter_list() {
        assert_eq!(KNOWN_SERVICES.len(), 8);
        assert!(is_known_service("Balayage"));
        assert!(!is_known_service("Haircut"));
    }

    #[test]
    fn deposit_lookup() {
        assert_eq!(deposit_for("highlights").unwrap().deposit, 75);
        assert_eq!(deposit_for("hair-color").unwrap().name, "Hair Color");
        assert_eq!(deposit_for("cut-and-style").unwrap().deposit, 30);
        assert!(deposit_for("perm").is_none());
    }
}
