//! Template command handlers.

use tabled::Tabled;

use dcnm_core::{Session, Template, TemplateParameter};

use crate::cli::{GlobalOpts, OutputFormat, TemplateArgs, TemplateCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    template_type: String,
    #[tabled(rename = "SubType")]
    subtype: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Template> for TemplateRow {
    fn from(t: &Template) -> Self {
        Self {
            name: t.name.clone(),
            template_type: t.template_type.clone(),
            subtype: t.template_subtype.clone(),
            description: t.description.clone(),
        }
    }
}

#[derive(Tabled)]
struct ParameterRow {
    #[tabled(rename = "Parameter")]
    name: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Mandatory")]
    mandatory: bool,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&TemplateParameter> for ParameterRow {
    fn from(p: &TemplateParameter) -> Self {
        Self {
            name: p.name.clone(),
            default: p.default_value.clone().unwrap_or_default(),
            mandatory: p.mandatory,
            description: p.description.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &mut Session,
    args: TemplateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TemplateCommand::List { filter, detail } => {
            let templates = dcnm_core::list_templates(session, filter.as_deref()).await?;
            let out = render_templates(&global.output, &templates, detail);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TemplateCommand::Get {
            name,
            no_populate,
            raw,
        } => {
            let template = dcnm_core::get_template(session, &name, !no_populate).await?;
            let out = if raw {
                output::render_single(&global.output, template.raw(), |_| template.verbose(), |_| {
                    template.verbose()
                })
            } else {
                output::render_single(&global.output, &template, detail, nvpair_lines)
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Names only, or `name: description` summaries with `detail`.
fn render_templates(format: &OutputFormat, templates: &[Template], detail: bool) -> String {
    if detail {
        output::render_list(format, templates, |t| TemplateRow::from(t), Template::summary)
    } else {
        output::render_list(
            format,
            templates,
            |t| NameRow {
                name: t.name.clone(),
            },
            |t| t.name.clone(),
        )
    }
}

fn detail(template: &Template) -> String {
    if template.parameters.is_empty() {
        return template.brief();
    }
    let rows: Vec<ParameterRow> = template.parameters.iter().map(ParameterRow::from).collect();
    format!("{}\n\n{}", template.brief(), output::render_table(&rows))
}

/// `name=default` per parameter, `*` marking mandatory ones.
fn nvpair_lines(template: &Template) -> String {
    template
        .nvpairs()
        .into_iter()
        .map(|(name, default, mandatory)| {
            let mark = if mandatory { "*" } else { "" };
            format!("{name}{mark}={}", default.unwrap_or_default())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
