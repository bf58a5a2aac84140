// Prompt constants for suggestion generation.

/// System prompt — fixes the consultant role and enforces JSON-only output.
pub const SUGGESTION_SYSTEM: &str =
    "You are an expert CV/Resume consultant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Tailoring prompt template. Replace `{cv_json}`, `{job_description}` and
/// `{position_context}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"Analyze the provided CV against the job description and suggest specific improvements to make the CV more relevant and impactful for this position.

## CV Content:
{cv_json}

## Job Description:
{job_description}

{position_context}

## Instructions:
Generate 5-15 specific, actionable suggestions to tailor this CV for the job. Focus on:
1. Modifying existing content to better match job requirements
2. Adding missing keywords, skills, or achievements that are relevant
3. Removing or de-emphasizing irrelevant content
4. Rewriting bullet points to highlight relevant experience

Return ONLY valid JSON with this exact structure:
{
  "suggestions": [
    {
      "id": "sugg-1",
      "type": "modify" | "add" | "remove",
      "section": "contact" | "summary" | "experience" | "education" | "skills" | "projects" | "certifications",
      "target": "path.to.field (e.g., 'experience.0.highlights.2' or 'skills.3' or 'summary')",
      "targetLabel": "Human-readable description (e.g., 'Software Engineer at Google - Highlight 3')",
      "original": "original text or null for 'add' type",
      "suggested": "the new/improved text",
      "reasoning": "why this change helps match the job description",
      "confidence": 0.0 to 1.0 (how confident this suggestion improves the CV)
    }
  ],
  "analysis": {
    "match_score": 0 to 100,
    "key_matches": ["list of matching skills/experiences"],
    "gaps": ["list of missing requirements"]
  }
}

## Rules:
1. Each suggestion must have a unique ID (sugg-1, sugg-2, etc.)
2. For 'modify' type, include both original and suggested text
3. For 'add' type, original should be null
4. For 'remove' type, suggested should be empty string
5. Target paths must be valid JSON paths into the CV structure
6. Prioritize high-impact changes first
7. Be specific and actionable - avoid vague suggestions
8. Focus on quantifiable achievements where possible
9. Ensure suggestions align with ATS (Applicant Tracking System) best practices
10. Return ONLY the JSON object, no other text"#;
