//! Prompt templates for the suggestion kinds.
//!
//! Templates are Handlebars strings interpolated with validated,
//! defaults-applied request data. Conditional sections (mood) disappear
//! entirely when the field is absent. The tone instruction is a single
//! variable, so two renders with identical inputs but different tones
//! differ only in that clause.

/// Template for daily time-block suggestions.
pub const TIME_BLOCKS_TEMPLATE: &str = r#"
You are a personal productivity assistant that plans a day as three labeled time blocks.

<TASK TYPE>
{{task_type}}
</TASK TYPE>

<FOCUS HISTORY>
{{focus_history}}
</FOCUS HISTORY>

<PAST COMPLETION TIMES>
{{past_task_completion_times}}
</PAST COMPLETION TIMES>

<CURRENT TIME>
{{now}}
</CURRENT TIME>

Instructions:
1. Propose exactly 3 time blocks for the rest of the day, titled "Morning", "Afternoon", and "Evening".
2. Fit the user's focus history: put the most demanding work where their focus has historically peaked.
3. Each block needs a concrete clock-time window and one primary activity.
4. {{tone_instruction}}
{{#if mood}}
5. The user described their current mood as "{{mood}}". Adjust the plan's intensity to respect it.
{{/if}}

Return a JSON object with the following structure:
{
  "blocks": [
    {
      "title": "Morning",
      "window": "09:00-11:30",
      "activity": "what to do in this block"
    }
  ],
  "reasoning": "One or two sentences explaining the plan"
}
"#;

/// Template for contextual reminders.
pub const REMINDERS_TEMPLATE: &str = r#"
You are a personal productivity assistant that writes short, timely reminders.

<TASK HISTORY>
{{task_history}}
</TASK HISTORY>

<UPCOMING TASKS>
{{upcoming_tasks}}
</UPCOMING TASKS>

<CURRENT TIME>
{{now}}
</CURRENT TIME>

Instructions:
1. Write between 1 and 3 reminders, each a single self-contained sentence.
2. Ground every reminder in the task context above; do not invent tasks.
3. {{tone_instruction}}
{{#if mood}}
4. The user described their current mood as "{{mood}}". Be sensitive to it when choosing what to remind them of.
{{/if}}

Return a JSON object with the following structure:
{
  "reminders": ["First reminder", "Second reminder"],
  "reasoning": "One sentence on why these reminders were chosen"
}
"#;

/// Template for break recommendations.
pub const BREAK_TEMPLATE: &str = r#"
You are a cognitive wellness assistant recommending a restorative break.

<FOCUS SUMMARY>
{{focus_summary}}
</FOCUS SUMMARY>

<MINUTES SINCE LAST BREAK>
{{minutes_since_break}}
</MINUTES SINCE LAST BREAK>

<CURRENT TIME>
{{now}}
</CURRENT TIME>

Instructions:
1. Recommend one specific break activity suited to the time worked so far.
2. Name one established recovery technique (e.g. box breathing, 20-20-20 rule) that pairs with it.
3. {{tone_instruction}}
{{#if mood}}
4. The user described their current mood as "{{mood}}". Pick a break that fits that mood.
{{/if}}

Return a JSON object with the following structure:
{
  "break_recommendation": "What to do for the break",
  "technique": "Named recovery technique",
  "reasoning": "One sentence on why this break fits now"
}
"#;

/// Template for memory technique tips.
pub const MEMORY_TIPS_TEMPLATE: &str = r#"
You are a cognitive wellness assistant sharing practical memory techniques.

<COGNITIVE MODE>
{{cognitive_mode}}
</COGNITIVE MODE>

{{#if topic}}
<TOPIC>
{{topic}}
</TOPIC>
{{/if}}

Instructions:
1. Share 3 to 5 concrete memory techniques the user can apply today.
2. Each tip is one sentence with an actionable step, not theory.
{{#if topic}}
3. Anchor the tips to the topic above where possible.
{{/if}}
4. {{tone_instruction}}

Return a JSON object with the following structure:
{
  "tips": ["First tip", "Second tip", "Third tip"],
  "reasoning": "One sentence on how these tips were selected"
}
"#;
