//! Built-in sample listings (prices in PKR).

use once_cell::sync::Lazy;

use domain::Category;

use crate::normalize::{normalize, DisplayListing, RawListing, SampleListing};

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    category: Category,
    location: &str,
    seller: &str,
    glyph: &'static str,
    is_premium: bool,
) -> SampleListing {
    SampleListing {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        category,
        location: location.to_string(),
        seller: seller.to_string(),
        glyph,
        is_premium,
    }
}

pub static SAMPLE_LISTINGS: Lazy<Vec<SampleListing>> = Lazy::new(|| {
    vec![
        sample(
            "1",
            "Premium Steel Beams - Grade A",
            "High-quality structural steel beams perfect for commercial and residential construction projects.",
            347_500.0,
            Category::Materials,
            "Karachi, Sindh",
            "Karachi Steel Works",
            "🏗️",
            false,
        ),
        sample(
            "2",
            "Industrial Concrete Mixer",
            "Heavy-duty concrete mixer for large construction projects. Excellent condition, recently serviced.",
            2_365_000.0,
            Category::Equipment,
            "Lahore, Punjab",
            "Punjab Construction Equipment",
            "🚛",
            true,
        ),
        sample(
            "3",
            "Professional Tool Set - 150 Pieces",
            "Complete professional tool set including power tools, hand tools, and safety equipment.",
            125_000.0,
            Category::Tools,
            "Islamabad, ICT",
            "Capital Tools & Hardware",
            "🔧",
            false,
        ),
        sample(
            "4",
            "Safety Equipment Bundle",
            "Complete safety package including hard hats, safety vests, gloves, and protective eyewear.",
            34_750.0,
            Category::Safety,
            "Rawalpindi, Punjab",
            "SafeWork Pakistan",
            "🦺",
            true,
        ),
        sample(
            "5",
            "High-Grade Cement - 50 Bags",
            "Premium quality cement suitable for all types of construction. Fresh stock, best rates in the market.",
            87_500.0,
            Category::Materials,
            "Faisalabad, Punjab",
            "Faisalabad Cement Depot",
            "🏭",
            false,
        ),
        sample(
            "6",
            "Excavator JCB 3DX - Rental",
            "Heavy-duty excavator available for rent. Perfect for digging, demolition, and earthmoving projects.",
            15_000.0,
            Category::Equipment,
            "Peshawar, KPK",
            "KPK Heavy Machinery",
            "🚜",
            true,
        ),
        sample(
            "7",
            "Galvanized Steel Roofing Sheets",
            "Corrugated roofing sheets for sheds, warehouses and homes. Rust-proof coating, cut to length.",
            2_800.0,
            Category::Materials,
            "Multan, Punjab",
            "Multan Roofing Supplies",
            "🏠",
            false,
        ),
        sample(
            "8",
            "Scaffolding System - Complete Set",
            "Professional scaffolding system for multi-story construction. Includes all brackets and safety equipment.",
            275_000.0,
            Category::Equipment,
            "Gujranwala, Punjab",
            "Gujranwala Scaffolding Co.",
            "🏗️",
            false,
        ),
        sample(
            "9",
            "Electrical Wiring Kit - Commercial",
            "Complete electrical wiring solution for commercial buildings. Includes cables, switches, and fixtures.",
            156_000.0,
            Category::Materials,
            "Sialkot, Punjab",
            "Sialkot Electrical Supplies",
            "⚡",
            true,
        ),
        sample(
            "10",
            "Steel & PVC Plumbing Pipes Set",
            "High-quality pipes with complete fittings. Suitable for residential and commercial use.",
            67_500.0,
            Category::Materials,
            "Hyderabad, Sindh",
            "Sindh Plumbing Solutions",
            "🔧",
            false,
        ),
        sample(
            "11",
            "Tower Crane - Heavy Duty",
            "Professional tower crane for high-rise construction projects. Experienced operator included.",
            450_000.0,
            Category::Equipment,
            "Karachi, Sindh",
            "Karachi Crane Services",
            "🏗️",
            true,
        ),
        sample(
            "12",
            "Marble & Granite Slabs",
            "Premium quality marble and granite slabs for luxury construction. Various colors and patterns available.",
            89_000.0,
            Category::Materials,
            "Quetta, Balochistan",
            "Balochistan Stone Works",
            "🪨",
            false,
        ),
    ]
});

/// Sample set in display shape, in its fixed order.
pub fn sample_display() -> Vec<DisplayListing> {
    SAMPLE_LISTINGS
        .iter()
        .map(|s| normalize(RawListing::Sample(s)))
        .collect()
}
