use chrono::NaiveDate;
use std::io::{self, Write};
use weekplan::{
    AllocationOutcome, AvailabilityConfig, SchedulableTask, WeeklyAvailability, WeeklyPlan,
    allocate, load_plan_from_csv, load_plan_from_json, save_plan_to_csv, save_plan_to_json,
    sort_for_allocation, weekday_from_name, weekday_name,
};

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_tasks(tasks: &[SchedulableTask]) -> String {
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.id.to_string(),
                task.title.clone(),
                task.priority.to_string(),
                task.required_hours.to_string(),
                task.due_date
                    .map(|d| d.date().to_string())
                    .unwrap_or_default(),
                task.group_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_text_table(&["id", "title", "priority", "hours", "due", "group"], &rows)
}

fn render_plan(plan: &WeeklyPlan) -> String {
    let rows: Vec<Vec<String>> = plan
        .iter()
        .map(|assignment| {
            vec![
                weekday_name(assignment.day).to_string(),
                assignment.start.format("%H:%M").to_string(),
                assignment.title.clone(),
                assignment.priority.to_string(),
                assignment.group_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_text_table(&["day", "start", "task", "priority", "group"], &rows)
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  show                                   Show current tasks\n  slots                                  Show parsed slot counts per day\n  avail <day> <ranges...>                Set a day's free time (e.g. avail monday 09:00-12:00, 14:00-16:00)\n  add <id> <title> <priority> <hours> [due]\n                                         Upsert a task (due like 2025-06-01)\n  delete <id>                            Remove a task\n  plan                                   Generate the weekly plan and show it\n  save <json|csv> <path>                 Persist the last generated plan\n  load <json|csv> <path>                 Load a plan from disk and show it\n  quit|exit                              Exit"
    );
}

fn main() {
    let mut availability = AvailabilityConfig::default();
    let mut tasks: Vec<SchedulableTask> = Vec::new();
    let mut last_plan: Option<WeeklyPlan> = None;

    println!("Weekplan (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_tasks(&tasks));
            }
            "slots" => {
                let pool = WeeklyAvailability::from_config(&availability);
                println!("{}", pool.describe());
            }
            "avail" => {
                let day_s = parts.next();
                match day_s.and_then(weekday_from_name) {
                    Some(day) => {
                        let rest = input
                            .splitn(3, char::is_whitespace)
                            .nth(2)
                            .unwrap_or("")
                            .to_string();
                        availability.set_raw(day, rest);
                        let pool = WeeklyAvailability::from_config(&availability);
                        println!("{} now has {} slot(s).", weekday_name(day), pool.remaining(day));
                    }
                    None => println!("Usage: avail <day> <ranges...>"),
                }
            }
            "add" => {
                let id_s = parts.next();
                let title_s = parts.next();
                let priority_s = parts.next();
                let hours_s = parts.next();
                let due_s = parts.next();
                match (id_s, title_s, priority_s, hours_s) {
                    (Some(id_s), Some(title), Some(priority_s), Some(hours_s)) => {
                        let id: i32 = match id_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid id");
                                continue;
                            }
                        };
                        let priority: u8 = match priority_s.parse() {
                            Ok(v @ 1..=4) => v,
                            _ => {
                                println!("Invalid priority (1-4)");
                                continue;
                            }
                        };
                        let hours: i64 = match hours_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid hours");
                                continue;
                            }
                        };
                        let due_date = match due_s {
                            Some(due_s) => match NaiveDate::parse_from_str(due_s, "%Y-%m-%d") {
                                Ok(d) => d.and_hms_opt(23, 59, 0),
                                Err(_) => {
                                    println!("Invalid due date (YYYY-MM-DD)");
                                    continue;
                                }
                            },
                            None => None,
                        };
                        let mut task = SchedulableTask::new(id, title, priority, hours);
                        task.due_date = due_date;
                        tasks.retain(|t| t.id != id);
                        tasks.push(task);
                        println!("Task upserted.");
                        println!("{}", render_tasks(&tasks));
                    }
                    _ => println!("Usage: add <id> <title> <priority> <hours> [due]"),
                }
            }
            "delete" => match parts.next().map(str::parse::<i32>) {
                Some(Ok(id)) => {
                    let before = tasks.len();
                    tasks.retain(|t| t.id != id);
                    if tasks.len() < before {
                        println!("Deleted task {id}.");
                    } else {
                        println!("Task {id} not found.");
                    }
                }
                _ => println!("Usage: delete <id>"),
            },
            "plan" => {
                sort_for_allocation(&mut tasks);
                let mut pool = WeeklyAvailability::from_config(&availability);
                let AllocationOutcome { plan, unassigned } = allocate(&tasks, &mut pool);
                println!("{}", render_plan(&plan));
                if unassigned.is_empty() {
                    println!("All tasks fully scheduled.");
                } else {
                    println!("Could not fully schedule: {}", unassigned.join(", "));
                }
                last_plan = Some(plan);
            }
            "save" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s, last_plan.as_ref()) {
                    (Some(format), Some(path), Some(plan)) => {
                        let result = match format {
                            "json" => save_plan_to_json(plan, path),
                            "csv" => save_plan_to_csv(plan, path),
                            _ => {
                                println!("Usage: save <json|csv> <path>");
                                continue;
                            }
                        };
                        match result {
                            Ok(()) => println!("Plan saved to {path}."),
                            Err(e) => println!("Error saving plan: {e}"),
                        }
                    }
                    (_, _, None) => println!("No plan generated yet; run 'plan' first."),
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let format_s = parts.next();
                let path_s = parts.next();
                match (format_s, path_s) {
                    (Some(format), Some(path)) => {
                        let result = match format {
                            "json" => load_plan_from_json(path),
                            "csv" => load_plan_from_csv(path),
                            _ => {
                                println!("Usage: load <json|csv> <path>");
                                continue;
                            }
                        };
                        match result {
                            Ok(plan) => {
                                println!("Plan loaded from {path}.");
                                println!("{}", render_plan(&plan));
                                last_plan = Some(plan);
                            }
                            Err(e) => println!("Error loading plan: {e}"),
                        }
                    }
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}
