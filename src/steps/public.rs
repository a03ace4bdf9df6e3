//! Public catalogue endpoints, no session needed

use super::{capture, Harness, CATEGORY_ID, MENU_ITEM_ID};
use crate::runner::{Call, Captures, StepOutcome};

pub fn welcome(h: &Harness) -> StepOutcome {
    h.call(Call::get(h.config.url("/")).describe("Welcome").summarize())
}

pub fn health(h: &Harness) -> StepOutcome {
    h.call(Call::get(h.config.url("/health")).describe("Health check").summarize())
}

/// Also captures the first category id
pub fn categories(h: &Harness, captures: &mut Captures) -> StepOutcome {
    let outcome = h.call(
        Call::get(h.config.url("/api/categories"))
            .describe("Get all categories")
            .summarize(),
    );
    capture(&outcome, captures, CATEGORY_ID, "0.id", "Sample category ID");
    outcome
}

pub fn active_categories(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/categories/active"))
            .describe("Get active categories")
            .summarize(),
    )
}

pub fn menu_items(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/menu"))
            .describe("Get all menu items")
            .summarize(),
    )
}

pub fn featured_items(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/menu/featured"))
            .describe("Get featured items")
            .summarize(),
    )
}

pub fn top_rated_items(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/menu/top-rated"))
            .describe("Get top rated items")
            .summarize(),
    )
}

pub fn popular_items(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/menu/popular"))
            .describe("Get popular items")
            .summarize(),
    )
}

pub fn search_menu(h: &Harness) -> StepOutcome {
    let url = h
        .config
        .url_with_query("/api/menu/search", &[("keyword", h.config.search_keyword.as_str())]);
    h.call(Call::get(url).describe("Search menu items").summarize())
}

pub fn filter_by_price(h: &Harness) -> StepOutcome {
    let min = h.config.min_price.to_string();
    let max = h.config.max_price.to_string();
    let url = h.config.url_with_query(
        "/api/menu/filter/price",
        &[("minPrice", min.as_str()), ("maxPrice", max.as_str())],
    );
    h.call(Call::get(url).describe("Filter by price").summarize())
}

pub fn payment_methods(h: &Harness) -> StepOutcome {
    h.call(
        Call::get(h.config.url("/api/payments/methods"))
            .describe("Get payment methods")
            .summarize(),
    )
}

/// First page of the menu, capturing the first item's id
pub fn menu_sample_page(h: &Harness, captures: &mut Captures) -> StepOutcome {
    let url = h
        .config
        .url_with_query("/api/menu", &[("page", "0"), ("size", "5")]);
    let outcome = h.call(Call::get(url).describe("Get menu sample page").summarize());
    capture(&outcome, captures, MENU_ITEM_ID, "content.0.id", "Sample menu item ID");
    outcome
}

pub fn menu_item_by_id(h: &Harness, captures: &Captures) -> StepOutcome {
    const NAME: &str = "Get menu item by ID";
    let id = match h.require_capture(captures, MENU_ITEM_ID, NAME) {
        Ok(id) => id,
        Err(skip) => return skip,
    };
    h.call(
        Call::get(h.config.url(&format!("/api/menu/{}", id)))
            .describe(NAME)
            .summarize(),
    )
}

pub fn category_by_id(h: &Harness, captures: &Captures) -> StepOutcome {
    const NAME: &str = "Get category by ID";
    let id = match h.require_capture(captures, CATEGORY_ID, NAME) {
        Ok(id) => id,
        Err(skip) => return skip,
    };
    h.call(
        Call::get(h.config.url(&format!("/api/categories/{}", id)))
            .describe(NAME)
            .summarize(),
    )
}

pub fn menu_by_category(h: &Harness, captures: &Captures) -> StepOutcome {
    const NAME: &str = "Get menu by category";
    let id = match h.require_capture(captures, CATEGORY_ID, NAME) {
        Ok(id) => id,
        Err(skip) => return skip,
    };
    h.call(
        Call::get(h.config.url(&format!("/api/menu/category/{}", id)))
            .describe(NAME)
            .summarize(),
    )
}
