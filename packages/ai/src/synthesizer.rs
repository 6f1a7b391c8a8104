// ABOUTME: Heuristic document synthesizer - keyword-rule-based document generation
// ABOUTME: Total, deterministic fallback used when no completion backend is available

use dealdraft_core::DocumentFields;

/// Default delivery window when no urgency or scope keyword is present
pub const DEFAULT_ETA: &str = "4-6 weeks";
/// Window applied when the text signals urgency
pub const URGENT_ETA: &str = "2-3 weeks";
/// Window applied when the text signals a large or complex scope
pub const EXTENDED_ETA: &str = "8-12 weeks";

struct DomainRule {
    keywords: &'static [&'static str],
    title: &'static str,
    problem: &'static str,
    impact: &'static str,
    desired_outcome: &'static str,
    est_price: u64,
}

// Checked in declaration order; the first rule with any keyword hit wins.
// Callers must not assume best-match semantics, only first-match.
const DOMAIN_RULES: &[DomainRule] = &[
    DomainRule {
        keywords: &[
            "online store",
            "e-commerce",
            "ecommerce",
            "cart",
            "checkout",
            "webshop",
        ],
        title: "E-commerce Platform Optimization",
        problem: "The online store is losing revenue to friction in the purchase funnel. \
                  Shoppers add items to the cart but abandon before completing checkout.",
        impact: "Every abandoned cart is lost revenue and wasted acquisition spend. \
                 Conversion lags behind what the existing traffic could support.",
        desired_outcome: "A streamlined storefront and checkout flow that recovers abandoned \
                          carts, lifts conversion, and grows average order value.",
        est_price: 15000,
    },
    DomainRule {
        keywords: &["restaurant", "menu", "cafe", "kitchen", "catering", "food"],
        title: "Food Service Operations Platform",
        problem: "Orders, reservations, and kitchen workflows run on disconnected tools \
                  and manual coordination, causing delays and mistakes at peak hours.",
        impact: "Slow table turnover and mishandled orders cost covers every service \
                 and erode repeat business.",
        desired_outcome: "A unified ordering and operations system that keeps front of house \
                          and kitchen in sync and shortens time to table.",
        est_price: 12000,
    },
    DomainRule {
        keywords: &[
            "clinic",
            "patient",
            "medical",
            "health",
            "appointment",
            "dental",
        ],
        title: "Healthcare Practice Management System",
        problem: "Patient scheduling, records, and follow-ups are handled manually or across \
                  systems that do not talk to each other.",
        impact: "Staff time is lost to phone-tag and double entry, no-shows go unmanaged, \
                 and patient experience suffers.",
        desired_outcome: "A practice management workflow with online scheduling, automated \
                          reminders, and a single view of each patient.",
        est_price: 20000,
    },
    DomainRule {
        keywords: &["marketing", "lead", "campaign", "crm", "advertis", "funnel"],
        title: "Marketing & Sales Automation Platform",
        problem: "Lead capture, nurturing, and follow-up are ad hoc, so prospects fall \
                  through the cracks between marketing and sales.",
        impact: "Campaign spend is hard to attribute and warm leads go cold before anyone \
                 follows up, capping pipeline growth.",
        desired_outcome: "An automated funnel that captures, scores, and routes leads with \
                          clear attribution from first touch to closed deal.",
        est_price: 10000,
    },
    DomainRule {
        keywords: &[
            "inventory",
            "warehouse",
            "stock",
            "supply chain",
            "logistics",
        ],
        title: "Inventory Management System",
        problem: "Stock levels are tracked in spreadsheets or by memory, so reorders are \
                  reactive and counts drift from reality.",
        impact: "Stockouts lose sales while overstock ties up cash, and staff spend hours \
                 reconciling counts instead of serving customers.",
        desired_outcome: "Real-time inventory visibility with automatic reorder points and \
                          accurate counts across locations.",
        est_price: 13000,
    },
];

// Fallback when no domain keyword matches; synthesis never fails
const GENERIC_RULE: DomainRule = DomainRule {
    keywords: &[],
    title: "Business Process Optimization",
    problem: "Day-to-day operations rely on manual steps and disconnected tools, \
              slowing the team down and hiding where time and money go.",
    impact: "Inefficiencies compound across the business, limiting capacity to grow \
             without adding headcount.",
    desired_outcome: "Streamlined, largely automated workflows with clear visibility \
                      into the metrics that matter.",
    est_price: 10000,
};

/// Synthesize a structured request document from free text.
///
/// Pure and total: any input, including the empty string, yields a fully
/// populated document. Domain selection is first-match over the ordered
/// keyword rules; the ETA adjustment is an orthogonal second pass.
pub fn synthesize(text: &str) -> DocumentFields {
    let lower = text.to_lowercase();

    let rule = DOMAIN_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lower.contains(keyword)))
        .unwrap_or(&GENERIC_RULE);

    let est_eta = adjust_eta(&lower);

    let mut fields = DocumentFields {
        title: rule.title.to_string(),
        problem: rule.problem.to_string(),
        impact: rule.impact.to_string(),
        desired_outcome: rule.desired_outcome.to_string(),
        est_price: rule.est_price,
        est_eta: est_eta.to_string(),
        full_content: String::new(),
    };
    fields.full_content = render_full_content(&fields);
    fields
}

// Urgency beats scope when both appear; applied after domain selection
fn adjust_eta(lower: &str) -> &'static str {
    if lower.contains("urgent") || lower.contains("asap") {
        URGENT_ETA
    } else if lower.contains("comprehensive") || lower.contains("complex") {
        EXTENDED_ETA
    } else {
        DEFAULT_ETA
    }
}

/// Render the document fields as a markdown body
pub fn render_full_content(fields: &DocumentFields) -> String {
    format!(
        "# {}\n\n## Problem\n{}\n\n## Impact\n{}\n\n## Desired Outcome\n{}\n\n\
         **Estimated Price:** ${}\n**Estimated Timeline:** {}\n",
        fields.title,
        fields.problem,
        fields.impact,
        fields.desired_outcome,
        fields.est_price,
        fields.est_eta
    )
}
