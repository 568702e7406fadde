use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    classloader-model completions --shell bash > ~/.bash_completion.d/classloader-model\n\n\
                  Generate zsh completions:\n    classloader-model completions --shell zsh > ~/.zfunc/_classloader-model\n\n\
                  Generate fish completions:\n    classloader-model completions --shell fish > ~/.config/fish/completions/classloader-model.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, short = 's')]
    pub shell: String,
}
