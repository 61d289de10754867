//! Shopping tool definitions exposed to the completion model.
//!
//! Four tools mirror the rule-based handlers, except that `search_products`
//! works from model-supplied candidate products (resolved to real purchase
//! URLs) instead of the static catalog.

mod executor;

pub use executor::{ToolExecutor, ToolOutcome};

use serde_json::json;

use crate::gemini::{FunctionDeclaration, ToolConfig};

/// All shopping tools, as a single tool config.
#[must_use]
pub fn shopping_tools() -> Vec<ToolConfig> {
    vec![ToolConfig {
        function_declarations: vec![
            search_products_tool(),
            add_to_cart_tool(),
            view_cart_tool(),
            checkout_tool(),
        ],
    }]
}

fn search_products_tool() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "search_products".to_string(),
        description: "Search for products on the web. Use this when the user wants to find, \
            browse, or look for products. You must return a JSON array of specific product \
            recommendations in the \"products\" field."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query for products (e.g., \"wireless earbuds under $50\")"
                },
                "products": {
                    "type": "array",
                    "description": "Your recommended products. Provide 3-5 specific, real products with accurate names and prices.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "description": "Full product name including brand (e.g., \"JBL Vibe Buds True Wireless Earbuds\")"
                            },
                            "price": {
                                "type": "number",
                                "description": "Approximate price in USD (e.g., 29.99). Use 0 if unknown."
                            },
                            "description": {
                                "type": "string",
                                "description": "One sentence product description"
                            },
                            "category": {
                                "type": "string",
                                "description": "Product category (e.g., Audio, Electronics, Home, Clothing)"
                            }
                        },
                        "required": ["name"]
                    }
                }
            },
            "required": ["query", "products"]
        }),
    }
}

fn add_to_cart_tool() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "add_to_cart".to_string(),
        description: "Add a product to the shopping cart. Use the product index from the last \
            search results (0-based) or provide product details directly."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "product_index": {
                    "type": "number",
                    "description": "Index of the product from the last search results (0-based). E.g., 0 for the first result."
                },
                "product_name": {
                    "type": "string",
                    "description": "Name of the product to add (used as fallback if index is not available)"
                }
            }
        }),
    }
}

fn view_cart_tool() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "view_cart".to_string(),
        description: "View the current contents of the shopping cart.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

fn checkout_tool() -> FunctionDeclaration {
    FunctionDeclaration {
        name: "checkout".to_string(),
        description: "Process checkout and place an order with the current cart items."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {}
        }),
    }
}
