//! Pure trip planners: budget estimation and packing lists.
//!
//! Both planners are total functions over their inputs. Nothing is
//! validated or rejected; negative and non-finite numbers flow straight
//! into the arithmetic and the rendered output.

/// Fixed essentials, packed regardless of destination or weather.
const ESSENTIALS: [&str; 6] = [
    "Toiletries",
    "Passport/ID",
    "Phone + Charger",
    "Medications",
    "Travel documents",
    "Power adapter (if international)",
];

/// Estimate a total trip cost from its weighted components and render the
/// fixed breakdown. Food scales with the day count; activities and
/// transport are whole-trip figures.
pub fn plan_budget(
    flight_cost: f64,
    hotel_cost: f64,
    daily_food: f64,
    days: i64,
    activities_cost: f64,
    transport_cost: f64,
) -> String {
    let food_total = daily_food * days as f64;
    let total = flight_cost + hotel_cost + food_total + activities_cost + transport_cost;

    format!(
        "💸 Estimated Budget for {days} Days:\n\
         \n\
         ✈️ Flight: ${flight_cost:.2}\n\
         🏨 Hotel: ${hotel_cost:.2}\n\
         🍽️ Food: ${food_total:.2} (${daily_food:.2}/day)\n\
         🚕 Transport: ${transport_cost:.2}\n\
         🎟️ Activities: ${activities_cost:.2}\n\
         \n\
         🧾 **Total Estimated Budget: ${total:.2}**"
    )
}

/// Build a packing list from the categorical rule table. Unrecognized
/// `weather` or `travel_type` values fall back to the mild/leisure
/// defaults rather than failing.
pub fn plan_luggage(city: &str, days: i64, weather: &str, travel_type: &str) -> String {
    let mut clothing: Vec<String> = Vec::new();

    let weather_items: &[&str] = match weather {
        "hot" => &["Lightweight T-shirts", "Shorts", "Sunglasses", "Hat", "Sunscreen"],
        "cold" => &["Warm sweaters", "Jacket/coat", "Gloves", "Beanie", "Thermal wear"],
        "rainy" => &["Raincoat/Umbrella", "Waterproof shoes", "Extra socks"],
        _ => &["T-shirts", "Jeans/pants", "Comfortable shoes"],
    };
    clothing.extend(weather_items.iter().map(|item| (*item).to_string()));

    let type_items: &[&str] = match travel_type {
        "business" => &["Formal attire", "Dress shoes", "Laptop/Tablet", "Business cards"],
        "adventure" => &["Hiking shoes", "Backpack", "Reusable water bottle", "First aid kit"],
        _ => &[],
    };
    clothing.extend(type_items.iter().map(|item| (*item).to_string()));

    // Quantities scale with the trip length, clamped to sensible bounds.
    clothing.push(format!("{} sets of underwear", days.max(3)));
    clothing.push(format!("{} pairs of socks", days.max(3)));
    clothing.push(format!("{} shirts/tops", days.min(5)));

    let mut list = format!("Packing list for a {days}-day {travel_type} trip to {city}:\n\n");
    list.push_str("**Clothing:**\n- ");
    list.push_str(&clothing.join("\n- "));
    list.push_str("\n\n**Essentials:**\n- ");
    list.push_str(&ESSENTIALS.join("\n- "));
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_budget_totals_all_components() {
        let report = plan_budget(100.0, 200.0, 50.0, 3, 0.0, 0.0);
        assert!(report.contains("Total Estimated Budget: $450.00"));
        assert!(report.contains("Food: $150.00 ($50.00/day)"));
        assert!(report.starts_with("💸 Estimated Budget for 3 Days:"));
    }

    #[test]
    fn test_budget_includes_optional_components() {
        let report = plan_budget(100.0, 200.0, 50.0, 3, 40.0, 25.0);
        assert!(report.contains("🚕 Transport: $25.00"));
        assert!(report.contains("🎟️ Activities: $40.00"));
        assert!(report.contains("Total Estimated Budget: $515.00"));
    }

    #[test]
    fn test_budget_accepts_negative_inputs() {
        // Permissive by design; no bounds checking.
        let report = plan_budget(-100.0, 200.0, 50.0, 2, 0.0, 0.0);
        assert!(report.contains("Flight: $-100.00"));
        assert!(report.contains("Total Estimated Budget: $200.00"));
    }

    #[test]
    fn test_luggage_cold_business_trip() {
        let list = plan_luggage("Paris", 2, "cold", "business");
        assert!(list.starts_with("Packing list for a 2-day business trip to Paris:"));
        assert!(list.contains("Warm sweaters"));
        assert!(list.contains("Formal attire"));
        assert!(list.contains("3 sets of underwear"));
        assert!(list.contains("3 pairs of socks"));
        assert!(list.contains("2 shirts/tops"));
    }

    #[rstest]
    #[case("hot", "Sunscreen")]
    #[case("cold", "Thermal wear")]
    #[case("rainy", "Waterproof shoes")]
    #[case("mild", "Comfortable shoes")]
    #[case("apocalyptic", "Comfortable shoes")]
    fn test_luggage_weather_selection(#[case] weather: &str, #[case] expected: &str) {
        assert!(plan_luggage("Lima", 4, weather, "leisure").contains(expected));
    }

    #[rstest]
    #[case(1, 3, 1)]
    #[case(3, 3, 3)]
    #[case(4, 4, 4)]
    #[case(10, 10, 5)]
    fn test_luggage_quantity_clamping(
        #[case] days: i64,
        #[case] underwear: i64,
        #[case] tops: i64,
    ) {
        let list = plan_luggage("Oslo", days, "mild", "leisure");
        assert!(list.contains(&format!("{underwear} sets of underwear")));
        assert!(list.contains(&format!("{tops} shirts/tops")));
    }

    #[test]
    fn test_luggage_leisure_adds_no_type_items() {
        let list = plan_luggage("Rome", 3, "mild", "leisure");
        assert!(!list.contains("Formal attire"));
        assert!(!list.contains("Hiking shoes"));
    }

    #[test]
    fn test_luggage_always_includes_essentials() {
        let list = plan_luggage("Tokyo", 5, "hot", "adventure");
        assert!(list.contains("**Essentials:**"));
        assert!(list.contains("Passport/ID"));
        assert!(list.contains("Power adapter (if international)"));
    }
}
