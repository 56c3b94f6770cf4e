use fenceplan_catalog::{Catalog, ProductCategory, ProductSelection};

pub const CATALOG_JSON: &str = r#"[
  {"category": "panel", "type": "Slat", "style": "Horizontal", "colour": "Surfmist",
   "height": 1.8, "width": 2.39, "sku": "PANEL-SLAT-HORIZONTAL-SURFMIST-1.8-2.39", "unitPrice": 185.0},
  {"category": "panel", "type": "Slat", "style": "Horizontal", "colour": null,
   "height": 1.8, "width": null, "sku": "SLAT-H-ANY", "unitPrice": 170.0},
  {"category": "post", "type": "Steel", "style": "Picket", "colour": "Black",
   "height": 2.4, "sku": "POST-STEEL-PICKET-BLACK-2.4", "unitPrice": 45.0},
  {"category": "post", "type": "Steel", "style": "Blade", "colour": "Black",
   "height": 2.4, "sku": "POST-STEEL-BLADE-BLACK-2.4", "unitPrice": 55.0},
  {"category": "gate", "type": "Single", "style": "Picket", "colour": "White",
   "height": 1.2, "width": 0.9, "sku": "GATE-SINGLE-PICKET-WHITE-1.2-0.9", "unitPrice": 320.0},
  {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
   "height": 1.8, "width": {"min": 3.1, "max": 3.6}, "sku": "SGATE-SLIDING-PICKET-BLACK-1.8-3.1to3.6", "unitPrice": 1100.0},
  {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
   "height": 1.8, "width": {"min": 3.7, "max": 4.2}, "sku": "SGATE-SLIDING-PICKET-BLACK-1.8-3.7to4.2", "unitPrice": 1250.0},
  {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
   "height": 1.8, "width": {"min": 4.3, "max": 5.0}, "sku": "SGATE-SLIDING-PICKET-BLACK-1.8-4.3to5", "unitPrice": 1400.0},
  {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": null,
   "height": 2.1, "width": {"min": 3.0, "max": 4.0}, "sku": "SG-ANY-2.1", "unitPrice": 1300.0},
  {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
   "height": 2.1, "width": {"min": 3.0, "max": 4.0}, "sku": "SGATE-SLIDING-PICKET-BLACK-2.1-3to4", "unitPrice": 1200.0}
]"#;

pub fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG_JSON).unwrap()
}

pub fn sliding(colour: &str, height: f64, width: f64) -> ProductSelection {
    ProductSelection::new(ProductCategory::SlidingGate, "Sliding", "Picket")
        .with_colour(colour)
        .with_height(height)
        .with_width(width)
}

pub fn panel(colour: &str) -> ProductSelection {
    ProductSelection::new(ProductCategory::Panel, "Slat", "Horizontal")
        .with_colour(colour)
        .with_height(1.8)
}

pub fn post(style: &str) -> ProductSelection {
    ProductSelection::new(ProductCategory::Post, "Steel", style)
        .with_colour("Black")
        .with_height(2.4)
}
