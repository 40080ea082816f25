// All task prompt templates for the Generation module.
// Placeholders are substituted by `generation::template::render`.

/// Resume polish without extra instructions.
/// Replace: {resume_content}, {position_name}
pub const RESUME_POLISH_TEMPLATE: &str = "Suggest improvements for the following resume \
content: '{resume_content}' to better align with the requirements and expectations of a \
{position_name} position. Return the polished version, highlighting necessary adjustments \
for clarity, relevance, and impact in relation to the targeted role.";

/// Resume polish steered by user instructions.
/// Replace: {resume_content}, {polish_instructions}, {position_name}
pub const RESUME_POLISH_INSTRUCTED_TEMPLATE: &str = "Given the resume content: \
'{resume_content}', polish it based on the following instructions: {polish_instructions} \
for the {position_name} position.";

/// Cover letter from the job posting alone.
/// Replace: {company_name}, {position_name}, {job_description}
pub const COVER_LETTER_TEMPLATE: &str = "Generate a customized cover letter using the \
company name: {company_name}, the position applied for: {position_name}, and the job \
description: {job_description}. The goal is to emphasize the alignment between the \
candidate's skills and the requirements of the role.";

/// Cover letter grounded in the candidate's resume.
/// Replace: {company_name}, {position_name}, {job_description}, {resume_content}
pub const COVER_LETTER_WITH_RESUME_TEMPLATE: &str = "Generate a customized cover letter \
using the company name: {company_name}, the position applied for: {position_name}, and the \
job description: {job_description}. Ensure the cover letter highlights my qualifications and \
experience as detailed in the resume content: {resume_content}. Adapt the content carefully \
to avoid including experiences not present in my resume but mentioned in the job \
description. The goal is to emphasize the alignment between my existing skills and the \
requirements of the role.";

/// Career advice for a role.
/// Replace: {job_description}, {position_name}
pub const CAREER_ADVICE_TEMPLATE: &str = "Considering the job description: \
{job_description}, identify the skills, experience, and qualifications a candidate should \
highlight or develop. Offer specific suggestions on how to better match the job \
requirements and increase the likelihood of being selected for the position of \
{position_name}.";

/// Career advice that reviews the candidate's resume against the role.
/// Replace: {job_description}, {resume_content}, {position_name}
pub const CAREER_ADVICE_WITH_RESUME_TEMPLATE: &str = "Considering the job description: \
{job_description}, and the resume provided: {resume_content}, identify areas for \
enhancement in the resume. Offer specific suggestions on how to improve these aspects to \
better match the job requirements and increase the likelihood of being selected for the \
position of {position_name}.";
