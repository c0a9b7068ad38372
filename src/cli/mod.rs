use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the chat endpoint over HTTP
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Ask a single question and print the reply
    Ask {
        question: String,

        /// Send the question to a running server instead of the provider
        #[arg(long)]
        remote: Option<String>,
    },

    /// Interactive chat in the terminal
    Chat {
        /// Talk to a running server instead of the provider
        #[arg(long)]
        remote: Option<String>,
    },

    /// List stored conversations, newest first
    Conversations,

    /// Print the messages of one conversation
    History {
        /// Id shown by `conversations`
        conversation_id: String,
    },
}
