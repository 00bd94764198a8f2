mod commands;
mod logging;

use clap::{Parser, Subcommand};
use commands::task::{AddArgs, EditArgs};

#[derive(Parser)]
#[command(name = "taskdeck", about = "Tasks, projects and categories in a local workspace", version)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr (TASKDECK_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a workspace in the current directory (or $TASKDECK_DIR)
    Init,

    /// Create, edit and list tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Summary counts and upcoming tasks
    Dashboard,

    /// Month view of due tasks
    Calendar {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Count of tasks overdue or due soon
    Notify,
}

#[derive(Subcommand)]
enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long)]
        desc: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Category name
        #[arg(long)]
        category: Option<String>,

        /// Project id or name
        #[arg(long)]
        project: Option<String>,
    },
    /// Edit fields of a task
    Edit {
        /// Task id or unique id prefix
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, conflicts_with = "clear_desc")]
        desc: Option<String>,

        #[arg(long)]
        clear_desc: bool,

        /// Due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        #[arg(long)]
        clear_due: bool,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,

        #[arg(long)]
        clear_category: bool,

        /// Project id or name
        #[arg(long, conflicts_with = "clear_project")]
        project: Option<String>,

        #[arg(long)]
        clear_project: bool,
    },
    /// Mark a task completed
    Done {
        /// Task id or unique id prefix
        id: String,
    },
    /// Mark a task pending again
    Reopen {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
    },
    /// Show one task
    Show {
        /// Task id or unique id prefix
        id: String,
    },
    /// List tasks
    List {
        /// Case-insensitive search over title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Status filter (all, completed, pending)
        #[arg(long, default_value = "all")]
        status: String,

        /// Sort key (none, date, priority)
        #[arg(long, default_value = "none")]
        sort: String,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Add a project
    Add {
        /// Project name
        name: String,

        #[arg(long)]
        desc: Option<String>,
    },
    /// Rename or re-describe a project
    Edit {
        /// Project id or name
        project: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, conflicts_with = "clear_desc")]
        desc: Option<String>,

        #[arg(long)]
        clear_desc: bool,
    },
    /// Delete a project and all of its tasks
    Delete {
        /// Project id or name
        project: String,
    },
    /// List projects with task counts
    List,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Delete a category; its tasks become uncategorized
    Delete {
        /// Category name
        name: String,
    },
    /// List categories
    List,
}

fn main() {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Task { action } => match action {
            TaskAction::Add {
                title,
                desc,
                due,
                priority,
                category,
                project,
            } => commands::task::add(AddArgs {
                title,
                description: desc,
                due,
                priority,
                category,
                project,
            }),
            TaskAction::Edit {
                id,
                title,
                desc,
                clear_desc,
                due,
                clear_due,
                priority,
                category,
                clear_category,
                project,
                clear_project,
            } => commands::task::edit(
                id,
                EditArgs {
                    title,
                    description: desc,
                    clear_description: clear_desc,
                    due,
                    clear_due,
                    priority,
                    category,
                    clear_category,
                    project,
                    clear_project,
                },
            ),
            TaskAction::Done { id } => commands::task::set_completed(id, true),
            TaskAction::Reopen { id } => commands::task::set_completed(id, false),
            TaskAction::Delete { id } => commands::task::delete(id),
            TaskAction::Show { id } => commands::task::show(id, cli.json),
            TaskAction::List {
                search,
                status,
                sort,
            } => commands::task::list(search, status, sort, cli.json),
        },
        Commands::Project { action } => match action {
            ProjectAction::Add { name, desc } => commands::project::add(name, desc),
            ProjectAction::Edit {
                project,
                name,
                desc,
                clear_desc,
            } => commands::project::edit(project, name, desc, clear_desc),
            ProjectAction::Delete { project } => commands::project::delete(project),
            ProjectAction::List => commands::project::list(cli.json),
        },
        Commands::Category { action } => match action {
            CategoryAction::Add { name } => commands::category::add(name),
            CategoryAction::Delete { name } => commands::category::delete(name),
            CategoryAction::List => commands::category::list(cli.json),
        },
        Commands::Dashboard => commands::dashboard::run(cli.json),
        Commands::Calendar { month } => commands::calendar::run(month, cli.json),
        Commands::Notify => commands::notify::run(cli.json),
    };

    if let Err(e) = result {
        log::debug!("event=command_failed error={:?}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
