use serde::Serialize;
use serde_json::Value;

const QUESTION_GROUP_TYPES: &[&str] = &["QUESTION", "CHECKBOXES"];
const OPTION_BLOCK_TYPES: &[&str] = &["CHECKBOX", "RADIO_BUTTON"];
const DEFAULT_QUESTION_TEXT: &str = "Question";
const DEFAULT_OPTION_TEXT: &str = "Option";

/// One logical question reconstructed from a group of presentation blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DisplayQuestion {
    pub(crate) index: usize,
    pub(crate) text: String,
    pub(crate) group_type: String,
    pub(crate) options: Vec<String>,
}

/// Groups a schema snapshot's flat block list into displayable questions.
///
/// Tally forms arrive as an ordered `blocks` array where each block carries a
/// `groupUuid` and a `groupType`; only QUESTION and CHECKBOXES groups are
/// questions, everything else (page breaks, thank-you blocks) is dropped.
/// Missing nested fields default rather than fail: the snapshot is stored
/// verbatim from a third party and cannot be trusted shape-wise.
pub(crate) fn render_questions(snapshot: &Value) -> Vec<DisplayQuestion> {
    let blocks = match snapshot.get("blocks").and_then(Value::as_array) {
        Some(blocks) => blocks.as_slice(),
        None => &[],
    };

    // First pass: question groups in first-seen order.
    let mut groups: Vec<QuestionGroup> = Vec::new();
    for block in blocks {
        let Some(group_uuid) = block_str(block, "groupUuid") else { continue };
        let Some(group_type) = block_str(block, "groupType") else { continue };
        if !QUESTION_GROUP_TYPES.contains(&group_type) {
            continue;
        }
        if !groups.iter().any(|group| group.uuid == group_uuid) {
            groups.push(QuestionGroup {
                uuid: group_uuid.to_string(),
                group_type: group_type.to_string(),
                blocks: Vec::new(),
            });
        }
    }

    // Second pass: bucket every block under its group, dropping the rest.
    for block in blocks {
        let Some(group_uuid) = block_str(block, "groupUuid") else { continue };
        if let Some(group) = groups.iter_mut().find(|group| group.uuid == group_uuid) {
            group.blocks.push(block);
        }
    }

    groups
        .iter()
        .enumerate()
        .map(|(position, group)| {
            let text = group
                .blocks
                .iter()
                .find(|block| block_str(block, "type") == Some("TITLE"))
                .and_then(|block| rich_text(block))
                .unwrap_or(DEFAULT_QUESTION_TEXT)
                .to_string();

            let options = group
                .blocks
                .iter()
                .filter(|block| {
                    block_str(block, "type")
                        .is_some_and(|block_type| OPTION_BLOCK_TYPES.contains(&block_type))
                })
                .map(|block| option_label(block).to_string())
                .collect();

            DisplayQuestion {
                index: position + 1,
                text,
                group_type: group.group_type.clone(),
                options,
            }
        })
        .collect()
}

struct QuestionGroup<'a> {
    uuid: String,
    group_type: String,
    blocks: Vec<&'a Value>,
}

fn block_str<'a>(block: &'a Value, key: &str) -> Option<&'a str> {
    block.get(key).and_then(Value::as_str)
}

/// First segment of Tally's nested rich-text encoding.
fn rich_text(block: &Value) -> Option<&str> {
    block
        .get("payload")?
        .get("safeHTMLSchema")?
        .get(0)?
        .get(0)?
        .as_str()
        .filter(|text| !text.is_empty())
}

fn option_label(block: &Value) -> &str {
    let payload = block.get("payload");
    payload
        .and_then(|payload| payload.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .or_else(|| rich_text(block))
        .or_else(|| {
            payload
                .and_then(|payload| payload.get("label"))
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or(DEFAULT_OPTION_TEXT)
}
