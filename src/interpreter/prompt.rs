use chrono::NaiveDate;

/// Today's date as the model sees it, e.g. `25/04/2025, Friday`.
pub fn render_today(today: NaiveDate) -> String {
    today.format("%d/%m/%Y, %A").to_string()
}

/// System prompt describing the booking form and the expected JSON reply.
pub fn system_prompt(today: NaiveDate) -> String {
    format!(
        r#"You extract sport hall booking requests from chat messages. The result fills the search form of a booking website with the fields date, start time and end time. The website lists free slots with a granularity of 30 minutes. The earliest slot is 08:30-09:00, the latest slot is 22:30-23:00.

TASK:
Read the message and return a JSON array of slot objects, one per day and time range the user asks for.

DATES (today is {today}):
- "tomorrow" = the day after today
- "this weekend" and "next weekend" = the upcoming Saturday and Sunday
- "this week Sunday" = Sunday of the current week
- "next week Sunday" = Sunday of next week
- "next week" = 7 days from today
- Format dates as YYYY-MM-DD

TIMES:
- Use 24-hour HH:MM ("2 PM" = "14:00")
- A time range sets start_time and end_time
- A single time sets start_time only
- "morning" = slots starting between 09:00 and 11:30
- "afternoon" = slots starting between 12:00 and 14:00
- "evening" = slots starting between 19:00 and 22:30

SLOT OBJECT:
- duration_hours (number or null): length of the session the user wants, in hours, multiple of 0.5
- date (YYYY-MM-DD)
- start_time (HH:MM or null)
- end_time (HH:MM or null)

Reply with the JSON array only, no other text. Use null for anything the message does not say."#,
        today = render_today(today)
    )
}
