/// System instructions sent alongside every enhanced prompt.
///
/// Chat-style providers receive this as a separate system message; the
/// completion-style ones (Gemini, Cohere, Ollama) get it prepended to the
/// prompt through [`combine_prompt`].
pub const SYSTEM_PROMPT: &str = "\
You are a senior software principal architect and professional AI agent developer specializing in creating complete applications.
Your task is to create all the files needed for a fully functional application based on the request.

You should:
- Analyze the user query and enrich it with necessary context and constraints
- Generate complete, working code for all necessary files
- Include proper imports and dependencies
- Ensure the code follows best practices and modern standards
- Provide clear file structure with appropriate file paths
- Support all languages, libraries, and frameworks as needed
- Make the solution self-contained and use professional language
- Arrange the files in the correct hierarchy for each technology
- Write the file names as per the development standard for each framework/language
- Create a readme.md file with the project description and the files that are created
- Files should be in the correct format for the technology
- Files should be in the correct language and name of file should be in the correct format
- Highlight the files that are new or modified

Format your response as a collection of files with clear file paths and complete code.";

/// Wrap a user prompt in the fixed project-generation template.
///
/// The template asks for a `project_structure.md`, one fenced block per file
/// whose fence header is the file path, and a closing README. The wording is
/// static; only `prompt` varies.
pub fn enhance_prompt(prompt: &str) -> String {
    format!(
        "\
Create a complete, working software project with the following specifications:

{prompt}

Please organize your response in the following structure:

1. First, provide a project_structure.md file that lists:
   - Complete directory tree structure
   - List of all files to be created
   - Dependencies and versions needed

2. Then, provide each source file with:
   - Exact file path and name following framework/language conventions
   - Complete, working code
   - Brief comment header explaining the file's purpose

3. Finally, provide:
   - README.md with setup instructions and usage examples
   - Any necessary configuration files (.env.example, package.json, etc.)

Important:
- Use proper file naming conventions for each technology
- Follow framework-specific directory structures
- Include all necessary configuration files
- Ensure file extensions match the language/framework
- Organize files in appropriate directories (src, tests, config, etc.)

Format each file as a code block starting with the full file path, like:
```filepath/filename.ext
[file contents]
```"
    )
}

/// Join system instructions and prompt for providers without a system role.
pub fn combine_prompt(system: &str, prompt: &str) -> String {
    format!("{system}\n\n{prompt}")
}
