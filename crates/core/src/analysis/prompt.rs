//! Extraction prompt for meeting notes
//!
//! The prompt pins down four things the response parser relies on: output
//! language follows the input, tasks and schedule items are disjoint,
//! relative dates are resolved against the supplied "today", and the reply is
//! a single JSON object with snake_case keys.
//!
//! Task policy: an item is a task whenever *what* must be done is clear, even
//! if the owner or deadline is not.

use chrono::NaiveDate;
use minutesync_domain::types::format_date;

const TODAY_SLOT: &str = "{{TODAY}}";
const NOTES_SLOT: &str = "{{NOTES}}";

const TEMPLATE: &str = r#"Below are meeting notes. Analyze them and extract the information as JSON.

Meeting notes:
"""
{{NOTES}}
"""

LANGUAGE REQUIREMENT:
- Write every piece of generated text in the SAME language as the meeting notes.
- Korean notes produce Korean summaries, titles and descriptions; English notes produce English; Japanese notes produce Japanese.

Analysis requirements:
1. summary: a Markdown document in the following Notion-style structure.
   - Key summary: the main topics and conclusions, structured
   - Process / criteria: decision criteria or working methods (when applicable)
   - Input / output data: input sources and expected deliverables (when applicable)
   - Meeting overview: date, duration, participants (grouped by team)
   - Discussion items: status, problems and resolutions per agenda item, numbered
   - Expected effects (when applicable)
   - Action items: as a checkbox list

2. todo_tasks: work someone has to spend time performing (action items).
   - Titles are verb phrases such as "Write the compliance report" or "Review the API draft".
   - Include an item whenever WHAT must be done is clear, even if WHO or WHEN is uncertain.
   - A plain meeting appointment or deadline reminder is not a task.
   - Exclude statements of fact such as "we discussed" or "we shared".

3. schedule_items: events where people gather at a specific time.
   - NEVER put tasks here. "Report due Friday" is a task deadline, not a meeting.
   - Only include appointments that come with a time and a place: weekly meetings, kick-offs, demos, workshops, lunches.

Respond with JSON in exactly this shape:
{
    "meeting_title": "Title in the form 'topic/department/YY-MM-DD', in the language of the notes",
    "meeting_date": "Actual meeting date from the notes (YYYY-MM-DD); today's date if none is stated",
    "department_name": "Main department that attended, taken from the notes",
    "summary": "Markdown summary following the structure above",
    "completed_tasks": [
        {
            "title": "Completed work",
            "description": "Details",
            "who": "Owner, if known"
        }
    ],
    "todo_tasks": [
        {
            "title": "Task title (e.g. 'Write the compliance report')",
            "description": "Details",
            "priority": "high/medium/low",
            "who": "Owner, if known",
            "deadline": "Due date (YYYY-MM-DD), or null",
            "context": "Source sentence"
        }
    ],
    "schedule_items": [
        {
            "title": "Meeting title (e.g. 'Second weekly meeting', 'Design demo')",
            "description": "Purpose of the meeting",
            "date": "YYYY-MM-DD",
            "time": "HH:MM",
            "duration_minutes": 60,
            "context": "Source sentence"
        }
    ],
    "important_dates": [
        {
            "date": "YYYY-MM-DD",
            "description": "Why the date matters"
        }
    ],
    "participants": ["Participant 1", "Participant 2"],
    "key_decisions": ["Decision 1", "Decision 2"]
}

Rules:
1. Reply with the JSON object only, with no other text.
2. Use an empty array [] for any category with no entries.
3. Dates must use the YYYY-MM-DD format.
4. Times must use the 24-hour HH:MM format.
5. Convert relative date expressions into concrete dates:
   - "by the end of January" -> the last day of that month
   - "mid next week" -> Wednesday of next week
   - "by Friday" -> the date of the coming Friday
   - "in N days" -> counted from the meeting date
   - Today's date is {{TODAY}}. Resolve every relative expression against it.
"#;

/// Build the extraction prompt for `notes`, anchoring relative dates to
/// `today`.
pub fn build_prompt(notes: &str, today: NaiveDate) -> String {
    // Fill the date first so text inside the notes is never treated as a slot.
    TEMPLATE.replace(TODAY_SLOT, &format_date(today)).replace(NOTES_SLOT, notes)
}
