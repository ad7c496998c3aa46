/// The closed set of query parameters the customer listing recognizes.
///
/// Declaration order is the order in which the validator checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryParam {
    Page,
    Limit,
    SortField,
    SortOrder,
    RegistrationDateFrom,
    RegistrationDateTo,
    LastOrderDateFrom,
    LastOrderDateTo,
    TotalAmountFrom,
    TotalAmountTo,
    OrderCountFrom,
    OrderCountTo,
    Search,
    Name,
}

impl QueryParam {
    pub const ALL: [QueryParam; 14] = [
        QueryParam::Page,
        QueryParam::Limit,
        QueryParam::SortField,
        QueryParam::SortOrder,
        QueryParam::RegistrationDateFrom,
        QueryParam::RegistrationDateTo,
        QueryParam::LastOrderDateFrom,
        QueryParam::LastOrderDateTo,
        QueryParam::TotalAmountFrom,
        QueryParam::TotalAmountTo,
        QueryParam::OrderCountFrom,
        QueryParam::OrderCountTo,
        QueryParam::Search,
        QueryParam::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryParam::Page => "page",
            QueryParam::Limit => "limit",
            QueryParam::SortField => "sortField",
            QueryParam::SortOrder => "sortOrder",
            QueryParam::RegistrationDateFrom => "registrationDateFrom",
            QueryParam::RegistrationDateTo => "registrationDateTo",
            QueryParam::LastOrderDateFrom => "lastOrderDateFrom",
            QueryParam::LastOrderDateTo => "lastOrderDateTo",
            QueryParam::TotalAmountFrom => "totalAmountFrom",
            QueryParam::TotalAmountTo => "totalAmountTo",
            QueryParam::OrderCountFrom => "orderCountFrom",
            QueryParam::OrderCountTo => "orderCountTo",
            QueryParam::Search => "search",
            QueryParam::Name => "name",
        }
    }

    /// Parameters whose string value may legitimately contain the `$` sigil.
    /// Their values only ever reach the store as escaped literal patterns.
    pub fn tolerates_sigil(&self) -> bool {
        matches!(self, QueryParam::Search)
    }
}

impl std::fmt::Display for QueryParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QueryParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryParam::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown query parameter: {}", s))
    }
}
