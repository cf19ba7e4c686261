//! Query construction for the search API.
//!
//! Turns one client and the requested categories into the single-message
//! chat request sent upstream. Pure: no I/O, no clock.

use crate::models::{ChatMessage, ChatRequest, ClientSpec};
use itertools::Itertools;

/// Most news items requested per category.
pub const MAX_ITEMS_PER_CATEGORY: usize = 3;

/// Word ceiling for the `AI_Summary` field.
pub const SUMMARY_MAX_WORDS: usize = 200;

/// Build the natural-language instruction for one client.
///
/// The instruction pins the output to a JSON object with `usage`,
/// `citations`, `search_results` and `AI_Summary`, embeds an example of that
/// shape, and restricts the search to the current quarter and `categories`.
///
/// # Arguments
///
/// * `client` - The validated client to ask about
/// * `categories` - Category labels, listed in order in the instruction
///
/// # Returns
///
/// The full prompt text for a single user message.
pub fn build_instruction(client: &ClientSpec, categories: &[String]) -> String {
    let name = &client.name;
    let categories = categories.iter().join(", ");
    format!(
        "Provide a complete, valid JSON object with keys: usage, citations, search_results, AI_Summary about {name} company.\n\
         search_results is an array with objects having fields: category, title, url, date, last_updated, snippet.\n\
         Limit the number of news items to at most {MAX_ITEMS_PER_CATEGORY} per category for performance.\n\
         AI_Summary is a concise natural language summary (maximum {SUMMARY_MAX_WORDS} words) of the most relevant news in the search_results.\n\
         If no relevant data is found, reply with an empty search_results array and a snippet message indicating no data.\n\
         Do NOT include any 'about {name} company' section.\n\
         Return ONLY the JSON object with no extra introduction or extraneous text.\n\
         Example:\n\
         {{ \"usage\": {{}}, \"citations\": [], \"search_results\": [{{ \"category\": \"Latest Headlines\", \
         \"title\": \"No relevant data found\", \"url\": \"\", \"date\": \"\", \"last_updated\": \"\", \"snippet\": \"No news available.\"}}],\n\
         \"AI_Summary\": \"This is a short summary of the most relevant news for {name}.\" }}\n\
         \nFind and categorize the most relevant news about {name} published in the current quarter. \
         Focus on the following categories: {categories}."
    )
}

/// Wrap the instruction for `client` in a chat request for `model`.
pub fn build_request(client: &ClientSpec, categories: &[String], model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: build_instruction(client, categories),
        }],
    }
}
