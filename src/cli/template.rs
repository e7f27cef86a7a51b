//! Template catalog commands.

use crate::cli::common::{print_json, split_list, CliError, CliResult};
use crate::models::WebsiteTemplate;
use crate::services::template_query::{
    self, PriceRange, SearchParams, SortKey, SortOrder, SortSpec, TemplateFilters,
    UserPreferences, DEFAULT_PAGE_SIZE,
};
use clap::{Args, Subcommand};

/// Browse the template catalog
#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// Template subcommand
    #[command(subcommand)]
    pub command: TemplateCommand,
}

/// Template subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommand {
    /// List every template
    List(ListArgs),
    /// Search, filter and sort templates
    Search(SearchArgs),
    /// Show one template
    Show(ShowArgs),
    /// Rank templates against preferences
    Recommend(RecommendArgs),
    /// Templates similar to a given one
    Related(RelatedArgs),
}

/// List every template
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Order by popularity instead of catalog order
    #[arg(long)]
    pub popular: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search templates
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Text matched against name, description and tags
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Comma-separated categories
    #[arg(long, value_name = "LIST")]
    pub category: Option<String>,

    /// Comma-separated styles
    #[arg(long, value_name = "LIST")]
    pub style: Option<String>,

    /// Comma-separated features (any may match)
    #[arg(long, value_name = "LIST")]
    pub feature: Option<String>,

    /// Minimum price
    #[arg(long, value_name = "USD")]
    pub min_price: Option<f64>,

    /// Maximum price
    #[arg(long, value_name = "USD")]
    pub max_price: Option<f64>,

    /// Only premium templates
    #[arg(long, conflicts_with = "free")]
    pub premium: bool,

    /// Only non-premium templates
    #[arg(long)]
    pub free: bool,

    /// Minimum rating
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<f64>,

    /// Sort key (popularity, rating, newest, name, price)
    #[arg(long, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Sort order (asc or desc)
    #[arg(long, value_name = "ORDER", default_value = "desc")]
    pub order: SortOrder,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one template
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Recommend templates
#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    /// Preferred category
    #[arg(long)]
    pub category: Option<String>,

    /// Preferred style
    #[arg(long)]
    pub style: Option<String>,

    /// Comma-separated wanted features
    #[arg(long, value_name = "LIST")]
    pub features: Option<String>,

    /// Number of results
    #[arg(long, default_value_t = 3)]
    pub limit: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Related templates
#[derive(Debug, Clone, Args)]
pub struct RelatedArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Number of results
    #[arg(long, default_value_t = 3)]
    pub limit: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl TemplateArgs {
    /// Execute the template command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = WebsiteTemplate::samples()
            .map_err(|e| CliError::io(format!("Failed to load template catalog: {e}")))?;

        match &self.command {
            TemplateCommand::List(args) => args.execute(&catalog),
            TemplateCommand::Search(args) => args.execute(&catalog),
            TemplateCommand::Show(args) => args.execute(&catalog),
            TemplateCommand::Recommend(args) => args.execute(&catalog),
            TemplateCommand::Related(args) => args.execute(&catalog),
        }
    }
}

fn print_summary(template: &WebsiteTemplate) {
    let price = if template.is_free() {
        "free".to_string()
    } else {
        format!("${:.0}", template.price)
    };
    println!(
        "  {} ({}) [{} / {}] {} - rating {:.1}, popularity {}",
        template.name,
        template.id,
        template.category,
        template.style,
        price,
        template.rating,
        template.popularity
    );
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, catalog: &[WebsiteTemplate]) -> CliResult<()> {
        let templates = if self.popular {
            template_query::popular(catalog, catalog.len())
        } else {
            catalog.to_vec()
        };

        if self.json {
            return print_json(&templates);
        }

        println!("Templates ({}):\n", templates.len());
        for template in &templates {
            print_summary(template);
        }
        Ok(())
    }
}

impl SearchArgs {
    fn params(&self) -> CliResult<SearchParams> {
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => {
                let range = PriceRange {
                    min: min.unwrap_or(0.0),
                    max: max.unwrap_or(f64::MAX),
                };
                if range.min > range.max {
                    return Err(CliError::validation(
                        "--min-price cannot be greater than --max-price",
                    ));
                }
                Some(range)
            }
        };

        let premium = match (self.premium, self.free) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Ok(SearchParams {
            query: self.query.clone(),
            filters: TemplateFilters {
                categories: self.category.as_deref().map(split_list).unwrap_or_default(),
                styles: self.style.as_deref().map(split_list).unwrap_or_default(),
                features: self.feature.as_deref().map(split_list).unwrap_or_default(),
                price_range,
                premium,
                min_rating: self.min_rating,
            },
            sort: self.sort.map(|key| SortSpec {
                key,
                order: self.order,
            }),
            page: self.page,
            limit: self.limit,
        })
    }

    /// Execute the search command
    pub fn execute(&self, catalog: &[WebsiteTemplate]) -> CliResult<()> {
        let results = template_query::search(catalog, &self.params()?);

        if self.json {
            return print_json(&results);
        }

        if results.total == 0 {
            println!("No templates match.");
            return Ok(());
        }

        println!(
            "{} match(es), page {} of {}:\n",
            results.total,
            results.page,
            results.total_pages.max(1)
        );
        for template in &results.templates {
            print_summary(template);
        }
        Ok(())
    }
}

fn find<'a>(catalog: &'a [WebsiteTemplate], id: &str) -> CliResult<&'a WebsiteTemplate> {
    template_query::find_by_id(catalog, id)
        .ok_or_else(|| CliError::not_found(format!("Template '{id}' not found")))
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, catalog: &[WebsiteTemplate]) -> CliResult<()> {
        let template = find(catalog, &self.id)?;

        if self.json {
            return print_json(template);
        }

        println!("{} ({})", template.name, template.id);
        println!("{}\n", template.description);
        println!("  Category: {}", template.category);
        println!("  Style:    {}", template.style);
        println!("  Features: {}", template.features.join(", "));
        println!("  Tags:     {}", template.tags.join(", "));
        println!("  Price:    {:.2}{}", template.price, if template.is_premium { " (premium)" } else { "" });
        println!("  Rating:   {:.1}", template.rating);
        println!("  Pages ({} sections):", template.section_count());
        for page in &template.pages {
            println!("    {} {} ({} sections)", page.slug, page.name, page.sections.len());
        }
        Ok(())
    }
}

impl RecommendArgs {
    /// Execute the recommend command
    pub fn execute(&self, catalog: &[WebsiteTemplate]) -> CliResult<()> {
        let prefs = UserPreferences {
            category: self.category.clone(),
            style: self.style.clone(),
            features: self.features.as_deref().map(split_list).unwrap_or_default(),
        };
        let recommendations = template_query::recommend(catalog, &prefs, self.limit);

        if self.json {
            return print_json(&recommendations);
        }

        println!("Recommended templates:\n");
        for scored in &recommendations {
            println!("  {:>5.2}  {} ({})", scored.score, scored.template.name, scored.template.id);
        }
        Ok(())
    }
}

impl RelatedArgs {
    /// Execute the related command
    pub fn execute(&self, catalog: &[WebsiteTemplate]) -> CliResult<()> {
        let template = find(catalog, &self.id)?;
        let related = template_query::related(catalog, template, self.limit);

        if self.json {
            return print_json(&related);
        }

        if related.is_empty() {
            println!("No related templates.");
        }
        for template in &related {
            print_summary(template);
        }
        Ok(())
    }
}
