//! Quick Filters
//!
//! Changelist shortcuts that rewrite the page's query string.

use chrono::{Days, NaiveDate};
use reqwest::Url;

use crate::error::{UiError, UiResult};

pub const DATE_FROM_PARAM: &str = "data_pedido__gte";
pub const DATE_TO_PARAM: &str = "data_pedido__lte";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    pub label: &'static str,
    pub key: &'static str,
    pub value: &'static str,
}

pub const STATUS_FILTERS: [StatusFilter; 4] = [
    StatusFilter { label: "Pendentes", key: "status", value: "pendente" },
    StatusFilter { label: "Confirmados", key: "status", value: "confirmado" },
    StatusFilter { label: "Enviados", key: "status", value: "enviado" },
    StatusFilter { label: "Pagos", key: "pagamento_confirmado", value: "True" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub label: &'static str,
    pub days: u64,
}

pub const DATE_RANGES: [DateRange; 4] = [
    DateRange { label: "Hoje", days: 1 },
    DateRange { label: "7 dias", days: 7 },
    DateRange { label: "30 dias", days: 30 },
    DateRange { label: "3 meses", days: 90 },
];

fn parse(href: &str) -> UiResult<Url> {
    Url::parse(href).map_err(|e| UiError::Dom(format!("bad page url {}: {}", href, e)))
}

/// Replace (or add) query parameters, keeping every other one
pub fn with_query_params(href: &str, params: &[(&str, &str)]) -> UiResult<String> {
    let mut url = parse(href)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(name, _)| name == k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        for (k, v) in params {
            query.append_pair(k, v);
        }
    }
    Ok(url.to_string())
}

pub fn status_url(href: &str, filter: &StatusFilter) -> UiResult<String> {
    with_query_params(href, &[(filter.key, filter.value)])
}

/// `days` back from `today`, both ends as ISO dates
pub fn date_range_url(href: &str, range: &DateRange, today: NaiveDate) -> UiResult<String> {
    let start = today
        .checked_sub_days(Days::new(range.days))
        .ok_or_else(|| UiError::Dom(format!("date out of range: {} - {}d", today, range.days)))?;
    let from = start.format("%Y-%m-%d").to_string();
    let to = today.format("%Y-%m-%d").to_string();
    with_query_params(href, &[(DATE_FROM_PARAM, from.as_str()), (DATE_TO_PARAM, to.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://loja.example/admin/pedidos/pedido/?o=-1&status=cancelado";

    #[test]
    fn test_status_replaces_existing_param() {
        let url = status_url(PAGE, &STATUS_FILTERS[0]).unwrap();
        assert_eq!(url, "https://loja.example/admin/pedidos/pedido/?o=-1&status=pendente");
    }

    #[test]
    fn test_paid_filter() {
        let url = status_url("https://loja.example/admin/pedidos/pedido/", &STATUS_FILTERS[3]).unwrap();
        assert_eq!(url, "https://loja.example/admin/pedidos/pedido/?pagamento_confirmado=True");
    }

    #[test]
    fn test_date_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let url = date_range_url(PAGE, &DATE_RANGES[1], today).unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        assert!(pairs.contains(&("data_pedido__gte".into(), "2024-02-27".into())));
        assert!(pairs.contains(&("data_pedido__lte".into(), "2024-03-05".into())));
        assert!(pairs.contains(&("status".into(), "cancelado".into())));
    }

    #[test]
    fn test_date_range_replaces_previous_range() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let first = date_range_url(PAGE, &DATE_RANGES[3], today).unwrap();
        let second = date_range_url(&first, &DATE_RANGES[0], today).unwrap();
        assert_eq!(second.matches("data_pedido__gte").count(), 1);
        assert!(second.contains("data_pedido__gte=2023-12-31"));
    }

    #[test]
    fn test_bad_href() {
        assert!(status_url("/relative", &STATUS_FILTERS[0]).is_err());
    }
}
