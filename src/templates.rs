//! Response template bank
//!
//! Fixed mapping from topic keywords to canned advice templates. Rules are
//! scanned in declaration order and the first keyword hit wins; matching is
//! plain substring containment on the lower-cased input, not tokenization.

/// A single (keywords, template) rule
pub struct ResponseRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

/// Static rule table — zero allocation, first match wins
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: "savings",
        keywords: &["save", "saving", "savings"],
        template: "Here's a savings strategy that works for most people:\n\
            1. Pay yourself first — transfer money to savings the day you get paid.\n\
            2. Follow the 50/30/20 rule: 50% needs, 30% wants, 20% savings.\n\
            3. Build an emergency fund of 3-6 months of expenses in a high-yield account.\n\
            4. Automate your transfers so saving never depends on willpower.\n\
            5. Review subscriptions and recurring charges every few months.\n\
            What are you saving for — an emergency fund, a big purchase, or something long term?",
    },
    ResponseRule {
        topic: "budgeting",
        keywords: &["budget", "spend", "expense", "track"],
        template: "Let's get your budget under control:\n\
            1. Track every expense for one full month before changing anything.\n\
            2. Sort your spending into needs, wants, and savings.\n\
            3. Set a realistic limit for each category and check in weekly.\n\
            4. Use the 50/30/20 rule as a starting point, then adjust to your life.\n\
            5. Review the budget monthly and tighten the categories that slipped.\n\
            Would you like help deciding your category limits?",
    },
    ResponseRule {
        topic: "investing",
        keywords: &["invest", "stock", "portfolio", "bond", "etf", "market"],
        template: "A few investing fundamentals to build on:\n\
            1. Start with low-cost index funds for broad diversification.\n\
            2. Match your stock/bond mix to your risk tolerance and time horizon.\n\
            3. Invest a fixed amount on a schedule instead of timing the market.\n\
            4. Rebalance once or twice a year, not on every headline.\n\
            5. Keep fund fees under 0.5% — costs compound just like returns.\n\
            What's your investment timeline — under 5 years, or longer?",
    },
    ResponseRule {
        topic: "debt",
        keywords: &["debt", "credit", "loan", "owe"],
        template: "Here's a plan for paying down debt:\n\
            1. List every debt with its balance and interest rate.\n\
            2. Pay off the highest-interest debt first (the avalanche method).\n\
            3. Always make at least the minimum payment on everything else.\n\
            4. Look into consolidation or balance transfers for better rates.\n\
            5. Stop adding new debt while you work down the old balances.\n\
            Which debts are you tackling — credit cards, loans, or both?",
    },
    ResponseRule {
        topic: "retirement",
        keywords: &["retire", "401k", "401(k)", "ira", "pension"],
        template: "Retirement planning, step by step:\n\
            1. Contribute enough to your 401(k) to get the full employer match.\n\
            2. Open a Roth IRA if you qualify — tax-free growth is hard to beat.\n\
            3. Aim to put 15% of your income toward retirement.\n\
            4. Raise your contribution by 1% every time you get a raise.\n\
            5. Revisit your asset allocation as retirement gets closer.\n\
            How far out is retirement for you — decades, or getting close?",
    },
    ResponseRule {
        topic: "emergency_fund",
        keywords: &["emergency", "rainy day"],
        template: "Building your emergency fund:\n\
            1. Aim for 3-6 months of living expenses.\n\
            2. Keep it in a high-yield savings account, separate from checking.\n\
            3. Start with a mini-goal of $1,000 and build from there.\n\
            4. Refill the fund first after any withdrawal.\n\
            5. Treat it as insurance, not an investment — liquidity beats yield here.\n\
            Do you already have a starter fund, or are you beginning from zero?",
    },
    ResponseRule {
        topic: "insurance",
        keywords: &["insurance", "coverage", "policy"],
        template: "Covering your bases with insurance:\n\
            1. Start with the essentials: health, auto, and home or renters.\n\
            2. Add term life insurance if anyone depends on your income.\n\
            3. Consider disability insurance — your income is your biggest asset.\n\
            4. Raise deductibles you could comfortably pay to lower premiums.\n\
            5. Review every policy once a year and shop around every few years.\n\
            Which coverage are you thinking about right now?",
    },
    ResponseRule {
        topic: "taxes",
        keywords: &["tax", "deduction", "refund"],
        template: "A few ways to keep more of what you earn:\n\
            1. Max out tax-advantaged accounts like a 401(k), IRA, or HSA first.\n\
            2. Keep records of deductible expenses throughout the year.\n\
            3. Compare the standard deduction against itemizing before you file.\n\
            4. Harvest investment losses to offset gains where it makes sense.\n\
            5. For anything complex, one session with a tax pro pays for itself.\n\
            Are you planning ahead for next year, or working on this year's return?",
    },
];

/// Returned when no rule keyword appears in the input
pub const FALLBACK_TEMPLATE: &str = "I'm here to help with your financial questions! \
    You can ask me about saving, budgeting, investing, debt, retirement, emergency funds, \
    insurance, or taxes — or type 'quiz' to test your money knowledge. \
    What would you like to know?";

/// Find the first rule whose keyword set intersects the input
pub fn match_rule(message: &str) -> Option<&'static ResponseRule> {
    let lowered = message.to_lowercase();

    RESPONSE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
}

/// Produce the canned advice for a message. Total over all inputs: unmatched
/// messages get the fallback template.
pub fn respond(message: &str) -> &'static str {
    match_rule(message)
        .map(|rule| rule.template)
        .unwrap_or(FALLBACK_TEMPLATE)
}
