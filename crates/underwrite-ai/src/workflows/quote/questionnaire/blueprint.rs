use super::super::domain::ProductType;
use super::{
    Comparison, Dependency, DependencyAction, ExpectedValue, Question, QuestionKind,
    QuestionOption, Step, StepGroup, Validation,
};

const YES_NO: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];
const NAME_PATTERN: &str = r"^[\p{L}' -]{2,50}$";

fn question(id: &'static str, label: &'static str, kind: QuestionKind) -> Question {
    Question {
        id,
        label,
        kind,
        required: false,
        options: Vec::new(),
        validation: None,
        dependencies: Vec::new(),
        help: None,
    }
}

impl Question {
    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn options(mut self, options: &[(&'static str, &'static str)]) -> Self {
        self.options = options
            .iter()
            .map(|&(value, label)| QuestionOption { value, label })
            .collect();
        self
    }

    fn bounds(mut self, min: f64, max: f64) -> Self {
        let validation = self.validation.get_or_insert_with(Validation::default);
        validation.min = Some(min);
        validation.max = Some(max);
        self
    }

    fn pattern(mut self, pattern: &'static str, message: &'static str) -> Self {
        let validation = self.validation.get_or_insert_with(Validation::default);
        validation.pattern = Some(pattern);
        validation.message = Some(message);
        self
    }

    fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    fn when(
        mut self,
        question_id: &'static str,
        comparison: Comparison,
        value: ExpectedValue,
        action: DependencyAction,
    ) -> Self {
        self.dependencies.push(Dependency {
            question_id,
            comparison,
            value: Some(value),
            action,
        });
        self
    }

    /// Shown and mandatory only when the condition holds.
    fn only_when(
        self,
        question_id: &'static str,
        comparison: Comparison,
        value: ExpectedValue,
    ) -> Self {
        self.when(question_id, comparison, value, DependencyAction::Show)
            .when(question_id, comparison, value, DependencyAction::Require)
    }
}

fn step(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    group: StepGroup,
    questions: Vec<Question>,
) -> Step {
    Step {
        id,
        title,
        description,
        group,
        questions,
    }
}

fn base_steps() -> Vec<Step> {
    use QuestionKind::{Checkbox, Date, Radio, Range, Select, Text};

    vec![
        step(
            "product_selection",
            "Choose your cover",
            "Which product would you like a quote for?",
            StepGroup::Base,
            vec![question("product_type", "Product", Radio)
                .required()
                .options(&[
                    ("auto", "Car insurance"),
                    ("home", "Home insurance"),
                    ("health", "Health insurance"),
                    ("life", "Life insurance"),
                ])],
        ),
        step(
            "identity",
            "About you",
            "Policyholder identity",
            StepGroup::Base,
            vec![
                question("first_name", "First name", Text)
                    .required()
                    .pattern(NAME_PATTERN, "enter between 2 and 50 letters"),
                question("last_name", "Last name", Text)
                    .required()
                    .pattern(NAME_PATTERN, "enter between 2 and 50 letters"),
                question("email", "Email", Text)
                    .required()
                    .pattern(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$", "enter a valid email address"),
                question("phone", "Phone", Text)
                    .pattern(r"^\+?[0-9 ]{8,16}$", "enter a valid phone number"),
                question("birth_date", "Date of birth", Date).required(),
            ],
        ),
        step(
            "address",
            "Where you live",
            "Main residence",
            StepGroup::Base,
            vec![
                question("street", "Street address", Text).required(),
                question("postal_code", "Postal code", Text)
                    .required()
                    .pattern(r"^\d{5}$", "postal code must have 5 digits"),
                question("city", "City", Text).required(),
                question("housing_status", "You are", Radio)
                    .required()
                    .options(&[
                        ("owner", "Homeowner"),
                        ("tenant", "Tenant"),
                        ("hosted", "Hosted free of charge"),
                    ]),
            ],
        ),
        step(
            "budget",
            "Budget and preferences",
            "What matters most in your cover",
            StepGroup::Base,
            vec![
                question("monthly_budget", "Monthly budget (EUR)", Range)
                    .required()
                    .bounds(20.0, 500.0),
                question("priorities", "Priorities", Checkbox).options(&[
                    ("price", "Lowest price"),
                    ("coverage", "Broadest cover"),
                    ("service", "Claims service"),
                    ("flexibility", "Flexible terms"),
                ]),
                question("payment_frequency", "Payment frequency", Select)
                    .required()
                    .options(&[
                        ("monthly", "Monthly"),
                        ("quarterly", "Quarterly"),
                        ("annual", "Annual"),
                    ]),
            ],
        ),
    ]
}

fn auto_steps() -> Vec<Step> {
    use ExpectedValue::{Number, Text as Is};
    use QuestionKind::{Number as Num, Radio, Select, Text};

    vec![
        step(
            "vehicle",
            "Your vehicle",
            "Vehicle to insure",
            StepGroup::Product,
            vec![
                question("vehicle_type", "Vehicle type", Select)
                    .required()
                    .options(&[("car", "Car"), ("motorbike", "Motorbike"), ("van", "Van")]),
                question("vehicle_value", "Estimated value (EUR)", Num).bounds(0.0, 500_000.0),
                question("vehicle_count", "Vehicles in the household", Num)
                    .required()
                    .bounds(1.0, 10.0),
                question("annual_mileage", "Annual mileage (km)", Num)
                    .required()
                    .bounds(0.0, 100_000.0),
                question("parking", "Overnight parking", Select)
                    .options(&[
                        ("garage", "Locked garage"),
                        ("driveway", "Private driveway"),
                        ("street", "Street"),
                    ])
                    .when("vehicle_type", Comparison::Equals, Is("motorbike"), DependencyAction::Hide),
            ],
        ),
        step(
            "driver",
            "Main driver",
            "Driver profile",
            StepGroup::Product,
            vec![
                question("driver_age", "Driver age", Num)
                    .required()
                    .bounds(16.0, 100.0),
                question("years_licensed", "Years licensed", Num)
                    .required()
                    .bounds(0.0, 84.0),
                question("bonus_malus", "Bonus-malus coefficient", Num)
                    .bounds(0.5, 3.5)
                    .help("1.00 is neutral; lower values reward claim-free years"),
            ],
        ),
        step(
            "driving_history",
            "Insurance history",
            "Claims and previous cover",
            StepGroup::Product,
            vec![
                question("claims_last_5_years", "Claims in the last 5 years", Num)
                    .required()
                    .bounds(0.0, 20.0),
                question("claim_details", "Describe the claims", Text).only_when(
                    "claims_last_5_years",
                    Comparison::GreaterThan,
                    Number(0.0),
                ),
                question("continuous_coverage_months", "Months of continuous cover", Num)
                    .bounds(0.0, 600.0),
                question("previous_insurer_cancelled", "Cancelled by a previous insurer?", Radio)
                    .required()
                    .options(YES_NO),
                question("cancellation_reason", "Reason for the cancellation", Text).only_when(
                    "previous_insurer_cancelled",
                    Comparison::Equals,
                    Is("yes"),
                ),
            ],
        ),
    ]
}

fn home_steps() -> Vec<Step> {
    use ExpectedValue::Text as Is;
    use QuestionKind::{Number as Num, Radio, Select};

    vec![
        step(
            "property",
            "Your property",
            "Home to insure",
            StepGroup::Product,
            vec![
                question("property_type", "Property type", Select)
                    .required()
                    .options(&[("house", "House"), ("apartment", "Apartment")]),
                question("surface", "Living area (m2)", Num)
                    .required()
                    .bounds(10.0, 2000.0),
                question("rooms", "Main rooms", Num).bounds(1.0, 30.0),
                question("construction_year", "Construction year", Num).bounds(1700.0, 2100.0),
                question("garden_size", "Garden area (m2)", Num)
                    .bounds(0.0, 100_000.0)
                    .when("property_type", Comparison::Equals, Is("house"), DependencyAction::Show),
            ],
        ),
        step(
            "protection",
            "Protection and contents",
            "Security and belongings",
            StepGroup::Product,
            vec![
                question("security_system", "Alarm or security system installed?", Radio)
                    .required()
                    .options(YES_NO),
                question("alarm_type", "Alarm type", Select)
                    .options(&[("monitored", "Remotely monitored"), ("local", "Local siren")])
                    .only_when("security_system", Comparison::Equals, Is("yes")),
                question("contents_value", "Contents value (EUR)", Num).bounds(0.0, 1_000_000.0),
                question("claims_last_5_years", "Claims in the last 5 years", Num)
                    .required()
                    .bounds(0.0, 20.0),
            ],
        ),
    ]
}

fn health_steps() -> Vec<Step> {
    use ExpectedValue::{Number, Text as Is};
    use QuestionKind::{Number as Num, Radio, Select, Text};

    vec![
        step(
            "household",
            "Your household",
            "People to cover",
            StepGroup::Product,
            vec![
                question("household_members", "People to cover", Num)
                    .required()
                    .bounds(1.0, 12.0),
                question("dependents_under_18", "Children under 18", Num)
                    .bounds(0.0, 11.0)
                    .when(
                        "household_members",
                        Comparison::GreaterThan,
                        Number(1.0),
                        DependencyAction::Show,
                    ),
            ],
        ),
        step(
            "health_profile",
            "Health profile",
            "Cover level and declarations",
            StepGroup::Product,
            vec![
                question("smoker", "Smoker?", Radio).required().options(YES_NO),
                question("coverage_level", "Cover level", Select)
                    .required()
                    .options(&[
                        ("basic", "Basic"),
                        ("standard", "Standard"),
                        ("premium", "Premium"),
                    ]),
                question("pre_existing_conditions", "Pre-existing conditions?", Radio)
                    .required()
                    .options(YES_NO),
                question("condition_details", "Describe the conditions", Text).only_when(
                    "pre_existing_conditions",
                    Comparison::Equals,
                    Is("yes"),
                ),
            ],
        ),
    ]
}

fn life_steps() -> Vec<Step> {
    use ExpectedValue::Text as Is;
    use QuestionKind::{Checkbox, Number as Num, Radio, Select, Text};

    vec![step(
        "life_cover",
        "Life cover",
        "Amount and beneficiaries",
        StepGroup::Product,
        vec![
            question("coverage_amount", "Cover amount (EUR)", Num)
                .required()
                .bounds(10_000.0, 5_000_000.0),
            question("smoker", "Smoker?", Radio).required().options(YES_NO),
            question("occupation_risk", "Occupational risk", Select)
                .required()
                .options(&[("low", "Office"), ("medium", "Mixed"), ("high", "Manual or hazardous")]),
            question("beneficiaries", "Beneficiaries", Checkbox).options(&[
                ("spouse", "Spouse or partner"),
                ("children", "Children"),
                ("parents", "Parents"),
                ("other", "Other"),
            ]),
            question("beneficiary_details", "Name the other beneficiaries", Text).only_when(
                "beneficiaries",
                Comparison::Includes,
                Is("other"),
            ),
        ],
    )]
}

fn closing_steps() -> Vec<Step> {
    use ExpectedValue::Text as Is;
    use QuestionKind::{Checkbox, Select, Text};

    vec![step(
        "lead_qualification",
        "Almost done",
        "How should an advisor follow up?",
        StepGroup::Closing,
        vec![
            question("current_insurer", "Current insurer", Text),
            question("contact_preference", "Preferred contact", Select)
                .required()
                .options(&[("email", "Email"), ("phone", "Phone call"), ("sms", "Text message")]),
            question("callback_time", "Best time to call", Select)
                .options(&[
                    ("morning", "Morning"),
                    ("afternoon", "Afternoon"),
                    ("evening", "Evening"),
                ])
                .only_when("contact_preference", Comparison::Equals, Is("phone")),
            question("consent", "Consent", Checkbox)
                .required()
                .options(&[
                    ("data_processing", "I agree to the processing of my data for this quote"),
                    ("marketing", "I agree to receive offers"),
                ]),
        ],
    )]
}

fn product_steps(product: ProductType) -> Vec<Step> {
    match product {
        ProductType::Auto => auto_steps(),
        ProductType::Home => home_steps(),
        ProductType::Health => health_steps(),
        ProductType::Life => life_steps(),
    }
}

/// Base steps, then the product block, then the closing steps. Depends only on the product.
pub fn assemble_steps(product: ProductType) -> Vec<Step> {
    let mut steps = base_steps();
    steps.extend(product_steps(product));
    steps.extend(closing_steps());
    steps
}
