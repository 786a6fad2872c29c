use crate::{
    config,
    dto::EmailRequest,
    gemini::{self, GeminiClient, GeminiError},
};

pub struct EmailService {
    gemini: GeminiClient,
}

impl EmailService {
    pub fn new(cfg: config::Gemini) -> Self {
        EmailService {
            gemini: GeminiClient::new(cfg),
        }
    }

    /// Run the full reply pipeline: build prompt, call Gemini, extract the
    /// generated text, post-process. Failures never escape; every error is
    /// folded into the returned string.
    pub async fn generate_email_reply(&self, request: EmailRequest) -> String {
        let prompt = build_prompt(&request);

        tracing::info!("Requesting email reply from Gemini");

        let raw = match self.gemini.generate(&prompt).await {
            Ok(body) => body,
            Err(GeminiError::Provider { body, .. }) => {
                return format!("Gemini API Error: {}", body);
            }
            Err(e) => {
                tracing::error!("Gemini call failed: {e}");
                return format!("Unexpected Error: {}", e);
            }
        };

        let reply = gemini::extract_reply_text(&raw);
        post_process(&reply)
    }
}

// Instruction string for Gemini. The tone clause is injected only when a
// non-blank tone was requested.
fn build_prompt(request: &EmailRequest) -> String {
    let mut prompt = String::from(
        "You are a professional email writing assistant. \
         Write a clear, concise, and polished email reply. \
         Do NOT include a subject line unless explicitly asked. \
         Ensure proper greeting, structured body, and professional closing. \
         Keep it between 80–150 words. \
         Avoid repetition or generic filler text. \
         Here is the email content: \n",
    );

    if let Some(tone) = request.tone.as_deref() {
        if !tone.trim().is_empty() {
            prompt.push_str("The tone should be ");
            prompt.push_str(tone);
            prompt.push_str(". ");
        }
    }

    prompt.push_str("Scenario:\n");
    prompt.push_str(&request.email_content);
    prompt
}

/// Normalize a generated reply: guarantee a greeting and a sign-off.
///
/// Detection is prefix/substring based ("dear"/"hi" and
/// "regards"/"sincerely"); replies using other phrasings get decorated
/// again.
fn post_process(email: &str) -> String {
    let email = email.trim();

    if email.is_empty() {
        return "Error: No email generated.".to_string();
    }

    let lower = email.to_lowercase();
    let mut result = String::new();

    if !lower.starts_with("dear") && !lower.starts_with("hi") {
        result.push_str("Dear [Recipient],\n\n");
    }

    result.push_str(email);

    if !lower.contains("regards") && !lower.contains("sincerely") {
        result.push_str("\n\nBest regards,\n[Your Name]");
    }

    result
}
