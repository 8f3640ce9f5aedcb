//! Static reference data: bookable services and illustrative time slots.

use concierge_types::Service;
use serde::Serialize;

/// (id, name, duration, price)
const SERVICES: [(&str, &str, &str, &str); 3] = [
    ("primary", "Primary Care Consultation", "45 mins", "$250"),
    ("specialist", "Specialist Diagnostic", "60 mins", "$400"),
    ("wellness", "Wellness & Nutrition", "60 mins", "$200"),
];

const TIME_SLOTS: [&str; 6] = ["9:00 AM", "10:30 AM", "1:00 PM", "2:30 PM", "4:00 PM", "5:30 PM"];

/// Read-only catalog the flow validates picks against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    services: Vec<Service>,
    time_slots: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The three services and six slots offered by the clinic.
    pub fn builtin() -> Self {
        Self {
            services: SERVICES
                .iter()
                .map(|(id, name, duration, price)| Service::new(*id, *name, *duration, *price))
                .collect(),
            time_slots: TIME_SLOTS.iter().map(|slot| slot.to_string()).collect(),
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    /// Look up a service by its stable id.
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    /// Look up a slot by its exact display label.
    pub fn time_slot(&self, label: &str) -> Option<&str> {
        self.time_slots.iter().map(String::as_str).find(|slot| *slot == label)
    }
}
