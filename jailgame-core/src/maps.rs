//! Built-in territory tables for the two rulesets.

use crate::config::TerritoryDef;

fn def(name: &str, cost: i64, population: u32, tax: i64, polygon: &[(f32, f32)]) -> TerritoryDef {
    TerritoryDef {
        name: name.to_string(),
        cost,
        population,
        tax,
        polygon: polygon.to_vec(),
    }
}

/// Coarse outlines with per-second tax income.
pub fn tax_only_territories() -> Vec<TerritoryDef> {
    vec![
        def(
            "France",
            100,
            0,
            10,
            &[
                (200.0, 300.0), (250.0, 250.0), (300.0, 250.0), (320.0, 300.0), (300.0, 350.0),
                (250.0, 400.0), (200.0, 350.0), (180.0, 320.0),
            ],
        ),
        def(
            "Germany",
            150,
            0,
            15,
            &[
                (350.0, 200.0), (400.0, 150.0), (450.0, 150.0), (470.0, 200.0), (450.0, 250.0),
                (420.0, 300.0), (380.0, 300.0), (340.0, 250.0),
            ],
        ),
        def(
            "Spain",
            80,
            0,
            8,
            &[
                (150.0, 400.0), (200.0, 350.0), (250.0, 350.0), (270.0, 400.0), (250.0, 450.0),
                (200.0, 450.0), (150.0, 420.0),
            ],
        ),
        def(
            "Italy",
            120,
            0,
            12,
            &[
                (320.0, 350.0), (350.0, 300.0), (380.0, 300.0), (400.0, 350.0), (380.0, 400.0),
                (350.0, 450.0), (320.0, 400.0),
            ],
        ),
        def(
            "Poland",
            70,
            0,
            7,
            &[
                (450.0, 200.0), (500.0, 150.0), (550.0, 150.0), (570.0, 200.0), (550.0, 250.0),
                (500.0, 300.0), (450.0, 250.0),
            ],
        ),
    ]
}

/// Detailed outlines with population; income comes from businesses.
pub fn full_territories() -> Vec<TerritoryDef> {
    vec![
        def(
            "France",
            150,
            67000,
            0,
            &[
                (180.0, 320.0), (185.0, 300.0), (195.0, 280.0), (210.0, 270.0), (230.0, 260.0),
                (250.0, 255.0), (270.0, 260.0), (290.0, 270.0), (310.0, 280.0), (320.0, 300.0),
                (325.0, 320.0), (320.0, 340.0), (310.0, 360.0), (290.0, 380.0), (270.0, 400.0),
                (250.0, 410.0), (230.0, 405.0), (210.0, 400.0), (190.0, 390.0), (180.0, 370.0),
                (175.0, 350.0), (175.0, 330.0), (180.0, 320.0),
            ],
        ),
        def(
            "Germany",
            225,
            84000,
            0,
            &[
                (340.0, 250.0), (350.0, 230.0), (360.0, 210.0), (380.0, 190.0), (400.0, 180.0),
                (420.0, 175.0), (440.0, 180.0), (460.0, 190.0), (470.0, 210.0), (465.0, 230.0),
                (460.0, 250.0), (450.0, 270.0), (440.0, 290.0), (420.0, 310.0), (400.0, 320.0),
                (380.0, 315.0), (360.0, 300.0), (350.0, 280.0), (340.0, 260.0), (340.0, 250.0),
            ],
        ),
        def(
            "Spain",
            120,
            47000,
            0,
            &[
                (140.0, 420.0), (150.0, 400.0), (160.0, 380.0), (170.0, 360.0), (190.0, 350.0),
                (210.0, 345.0), (230.0, 350.0), (250.0, 360.0), (270.0, 380.0), (280.0, 400.0),
                (275.0, 420.0), (260.0, 440.0), (240.0, 450.0), (220.0, 460.0), (200.0, 465.0),
                (180.0, 460.0), (160.0, 450.0), (145.0, 440.0), (140.0, 420.0),
            ],
        ),
        def(
            "Italy",
            180,
            59000,
            0,
            &[
                (310.0, 400.0), (320.0, 380.0), (330.0, 360.0), (340.0, 340.0), (350.0, 320.0),
                (360.0, 300.0), (380.0, 290.0), (400.0, 300.0), (410.0, 320.0), (405.0, 340.0),
                (400.0, 360.0), (390.0, 380.0), (380.0, 400.0), (370.0, 420.0), (360.0, 440.0),
                (350.0, 460.0), (340.0, 450.0), (330.0, 430.0), (320.0, 410.0), (310.0, 400.0),
            ],
        ),
        def(
            "Poland",
            105,
            38000,
            0,
            &[
                (440.0, 250.0), (450.0, 230.0), (460.0, 210.0), (480.0, 200.0), (500.0, 195.0),
                (520.0, 200.0), (540.0, 210.0), (550.0, 230.0), (555.0, 250.0), (550.0, 270.0),
                (540.0, 290.0), (520.0, 300.0), (500.0, 305.0), (480.0, 300.0), (460.0, 290.0),
                (450.0, 280.0), (440.0, 260.0), (440.0, 250.0),
            ],
        ),
    ]
}
