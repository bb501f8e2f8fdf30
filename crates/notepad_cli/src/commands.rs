use crate::picker::FilePhotoPicker;
use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDateTime, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use futures::executor::block_on;
use notepad_core::view::list::format_timestamp;
use notepad_core::{
    App, AppConfig, AttachOutcome, DetailSession, InMemoryNotificationCenter, InkColor, InkTool,
    NoteId, NoteList, ReminderOutcome, StrokePoint,
};
use std::path::PathBuf;

const REMINDER_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";
const DEFAULT_SEED_COUNT: usize = 10;

#[derive(Parser)]
#[command(
    name = "notepad",
    version,
    about = "Notes with reminders, photos and sketches",
    after_help = "Reminder times are saved with each note, but alerts are not kept between runs."
)]
pub struct Cli {
    /// Note database file. Overrides NOTEPAD_DB_PATH.
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files. Overrides NOTEPAD_LOG_DIR.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error. Overrides NOTEPAD_LOG_LEVEL.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = Some(log_dir.clone());
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List notes, oldest first")]
    List {
        /// Case-insensitive filter over title and body.
        #[arg(long)]
        search: Option<String>,
    },

    #[command(about = "Create a blank note")]
    Add,

    #[command(about = "Replace a note title")]
    Rename { id: NoteId, title: String },

    #[command(about = "Delete a note and cancel its reminder")]
    Delete { id: NoteId },

    #[command(about = "Show one note")]
    Show { id: NoteId },

    #[command(
        about = "Save body and reminder for a note",
        long_about = "Save body and reminder for a note.\n\nThe reminder time is stored with the \
                      note, but this host has no system notification service: the alert only \
                      lives until the command exits and does not fire later."
    )]
    Save {
        id: NoteId,
        #[arg(long)]
        body: Option<String>,
        /// Local time as "YYYY-MM-DD HH:MM".
        #[arg(long, conflicts_with = "no_reminder")]
        remind_at: Option<String>,
        #[arg(long)]
        no_reminder: bool,
    },

    #[command(about = "Attach a photo file to a note")]
    AttachPhoto { id: NoteId, file: PathBuf },

    #[command(about = "Remove a note's photo")]
    ClearPhoto { id: NoteId },

    #[command(about = "Remove a note's sketch")]
    ClearSketch { id: NoteId },

    #[command(about = "Append one stroke to a note's sketch")]
    Sketch {
        id: NoteId,
        /// Points as "x,y", at least one.
        #[arg(required = true, value_parser = parse_point)]
        points: Vec<StrokePoint>,
        #[arg(long, value_enum, default_value_t = ToolArg::Pen)]
        tool: ToolArg,
        #[arg(long, default_value_t = 2.0)]
        width: f64,
    },

    #[command(about = "Print what the share sheet would send")]
    Share { id: NoteId },

    #[command(about = "Insert numbered sample notes")]
    Seed {
        #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToolArg {
    Pen,
    Pencil,
    Marker,
}

impl From<ToolArg> for InkTool {
    fn from(value: ToolArg) -> Self {
        match value {
            ToolArg::Pen => InkTool::Pen,
            ToolArg::Pencil => InkTool::Pencil,
            ToolArg::Marker => InkTool::Marker,
        }
    }
}

pub fn run(app: &App<InMemoryNotificationCenter>, command: Commands) -> Result<()> {
    let notes = app.notes()?;
    match command {
        Commands::List { search } => {
            let mut list = NoteList::load(&notes)?;
            if let Some(search) = search {
                list.set_search(search);
            }
            for row in list.visible_rows() {
                let bell = row
                    .reminder_label()
                    .map(|at| format!(" [bell {at}]"))
                    .unwrap_or_default();
                println!("{}  {}{}  {}", row.id, row.created_label(), bell, row.title);
            }
        }
        Commands::Add => {
            let mut list = NoteList::load(&notes)?;
            println!("{}", list.add_note(&notes)?);
        }
        Commands::Rename { id, title } => {
            let list = NoteList::load(&notes)?;
            let mut edit = list
                .begin_title_edit(id)
                .ok_or_else(|| anyhow!("note not found: {id}"))?;
            edit.draft = title;
            let note = edit.confirm(&notes)?;
            println!("{}", note.title);
        }
        Commands::Delete { id } => {
            DetailSession::open(&notes, id)?.delete(&notes)?;
            println!("deleted {id}");
        }
        Commands::Show { id } => {
            let detail = DetailSession::open(&notes, id)?;
            let note = detail.note();
            println!("title:    {}", note.title);
            println!("created:  {}", format_timestamp(note.created_at));
            if let Some(at) = note.reminder_at {
                println!("reminder: {}", format_timestamp(at));
            }
            if let Some(image) = &note.image_data {
                println!("photo:    {} bytes", image.len());
            }
            match (&note.drawing_data, detail.sketch_preview()) {
                (None, _) => {}
                (Some(_), Some(sketch)) => println!("sketch:   {} strokes", sketch.strokes.len()),
                (Some(_), None) => println!("sketch:   unreadable"),
            }
            println!();
            println!("{}", detail.body());
        }
        Commands::Save {
            id,
            body,
            remind_at,
            no_reminder,
        } => {
            let mut detail = DetailSession::open(&notes, id)?;
            if let Some(body) = body {
                detail.set_body(body);
            }
            if let Some(raw) = remind_at {
                detail.set_reminder_enabled(true);
                detail.set_reminder_time(parse_local_minute(&raw)?);
            }
            if no_reminder {
                detail.set_reminder_enabled(false);
            }
            let outcome = block_on(detail.save(&notes))?;
            println!("{}", describe_save(outcome));
        }
        Commands::AttachPhoto { id, file } => {
            let mut detail = DetailSession::open(&notes, id)?;
            let picker = FilePhotoPicker::new(file);
            match block_on(detail.attach_photo(&notes, &picker))? {
                AttachOutcome::Attached => println!("photo attached"),
                AttachOutcome::Cancelled => println!("no photo attached"),
            }
        }
        Commands::ClearPhoto { id } => {
            DetailSession::open(&notes, id)?.delete_photo(&notes)?;
            println!("photo removed");
        }
        Commands::ClearSketch { id } => {
            DetailSession::open(&notes, id)?.delete_sketch(&notes)?;
            println!("sketch removed");
        }
        Commands::Sketch {
            id,
            points,
            tool,
            width,
        } => {
            let detail = DetailSession::open(&notes, id)?;
            let mut canvas = detail.open_sketch();
            if let Some(reason) = canvas.load_error() {
                eprintln!("warning: stored sketch discarded: {reason}");
            }
            let mut points = points.into_iter();
            if let Some(first) = points.next() {
                canvas.begin_stroke(tool.into(), InkColor::BLACK, width, first);
                points.for_each(|point| canvas.extend_stroke(point));
            }
            let strokes = canvas.sketch().strokes.len() + 1;
            canvas.save(&notes)?;
            println!("sketch saved with {strokes} strokes");
        }
        Commands::Share { id } => {
            let payload = DetailSession::open(&notes, id)?.share_payload();
            println!("{}", payload.text);
            if let Some(image) = payload.image {
                println!("[image: {} bytes]", image.len());
            }
        }
        Commands::Seed { count } => {
            for id in notes.seed_samples(count)? {
                println!("{id}");
            }
        }
    }
    Ok(())
}

fn describe_save(outcome: ReminderOutcome) -> String {
    match outcome {
        ReminderOutcome::Scheduled(trigger) => format!(
            "saved; reminder at {:04}-{:02}-{:02} {:02}:{:02} stored \
             (alerts are not kept between runs, so it will not fire)",
            trigger.year, trigger.month, trigger.day, trigger.hour, trigger.minute
        ),
        ReminderOutcome::Cleared => "saved".to_string(),
        ReminderOutcome::PermissionDenied => {
            "saved; notifications are not allowed, reminder turned off".to_string()
        }
    }
}

fn parse_local_minute(raw: &str) -> Result<i64> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), REMINDER_INPUT_FORMAT)
        .map_err(|err| anyhow!("invalid reminder time `{raw}`: {err}"))?;
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local.timestamp_millis()),
        None => bail!("reminder time `{raw}` does not exist in the local time zone"),
    }
}

fn parse_point(raw: &str) -> Result<StrokePoint, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got `{raw}`"))?;
    let x = x.trim().parse::<f64>().map_err(|err| err.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|err| err.to_string())?;
    Ok(StrokePoint::new(x, y))
}
