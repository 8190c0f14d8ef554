//! Shared test doubles and upstream payload fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tickerscope_core::{
    AlphaVantageClient, ClientConfig, HttpClient, HttpError, HttpRequest, HttpResponse,
    DEFAULT_RATE_LIMIT_NOTICE,
};

/// In-memory transport that replays scripted responses and records every request.
///
/// Once the script is exhausted the fallback response is returned forever.
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    fallback: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(
        script: Vec<Result<HttpResponse, HttpError>>,
        fallback: Result<HttpResponse, HttpError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn always(response: HttpResponse) -> Arc<Self> {
        Self::new(Vec::new(), Ok(response))
    }

    pub fn then_json(script: Vec<Value>, fallback: Value) -> Arc<Self> {
        Self::new(
            script.into_iter().map(|body| Ok(json_response(&body))).collect(),
            Ok(json_response(&fallback)),
        )
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("request log is not poisoned").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("request log is not poisoned").len()
    }

    /// `apikey` of every recorded request, in order.
    pub fn keys_used(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|request| request.query_value("apikey").map(str::to_owned))
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .push(request);
        let next = self
            .script
            .lock()
            .expect("script is not poisoned")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Box::pin(async move { next })
    }
}

/// Transport that answers with the rate-limit notice unless the request
/// carries one of the `working_keys`.
pub struct KeyGatedHttpClient {
    working_keys: Vec<String>,
    body: Value,
    requests: Mutex<Vec<HttpRequest>>,
}

impl KeyGatedHttpClient {
    pub fn new(working_keys: &[&str], body: Value) -> Arc<Self> {
        Arc::new(Self {
            working_keys: working_keys.iter().map(|key| (*key).to_owned()).collect(),
            body,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn keys_used(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .iter()
            .filter_map(|request| request.query_value("apikey").map(str::to_owned))
            .collect()
    }
}

impl HttpClient for KeyGatedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let accepted = request
            .query_value("apikey")
            .is_some_and(|key| self.working_keys.iter().any(|working| working == key));
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .push(request);
        let body = if accepted {
            self.body.clone()
        } else {
            rate_limit_notice()
        };
        Box::pin(async move { Ok(json_response(&body)) })
    }
}

pub fn json_response(body: &Value) -> HttpResponse {
    HttpResponse::ok_json(body.to_string())
}

pub fn keys(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("key-{index}")).collect()
}

pub fn config(count: usize, calls_per_key: u32) -> ClientConfig {
    ClientConfig::new(keys(count))
        .with_calls_per_key(calls_per_key)
        .with_base_url("https://av.test/query")
}

pub fn client(config: &ClientConfig, http_client: Arc<dyn HttpClient>) -> AlphaVantageClient {
    AlphaVantageClient::with_http_client(config, http_client).expect("valid config")
}

pub fn rate_limit_notice() -> Value {
    json!({ "Note": DEFAULT_RATE_LIMIT_NOTICE })
}

pub fn bar(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Value {
    json!({
        "1. open": open,
        "2. high": high,
        "3. low": low,
        "4. close": close,
        "5. volume": volume
    })
}

pub fn intraday_document() -> Value {
    json!({
        "Meta Data": {
            "1. Information": "Intraday (5min) open, high, low, close prices and volume",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-01-05 19:55:00",
            "4. Interval": "5min",
            "5. Output Size": "Compact",
            "6. Time Zone": "US/Eastern"
        },
        "Time Series (5min)": {
            "2024-01-05 19:55:00": bar("159.9000", "160.0000", "159.8500", "159.9500", "1024"),
            "2024-01-05 19:45:00": bar("159.7000", "159.9000", "159.6500", "159.8000", "310"),
            "2024-01-05 19:50:00": bar("159.8000", "159.9500", "159.7500", "159.9000", "88")
        }
    })
}

pub fn daily_document() -> Value {
    json!({
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-01-05",
            "4. Output Size": "Compact",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2024-01-05": bar("160.5000", "161.2000", "158.9000", "159.1600", "3989520"),
            "2024-01-03": bar("161.0000", "161.7300", "160.0800", "160.1000", "4086147"),
            "2024-01-04": bar("160.2000", "161.9100", "160.1600", "160.8600", "4096431")
        }
    })
}

pub fn weekly_document() -> Value {
    json!({
        "Meta Data": {
            "1. Information": "Weekly Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-01-05",
            "4. Time Zone": "US/Eastern"
        },
        "Weekly Time Series": {
            "2024-01-05": bar("162.8300", "163.2900", "158.6700", "159.1600", "17493660"),
            "2023-12-29": bar("162.6400", "163.7500", "161.8700", "163.5500", "12047870")
        }
    })
}

pub fn monthly_document() -> Value {
    json!({
        "Meta Data": {
            "1. Information": "Monthly Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-01-05",
            "4. Time Zone": "US/Eastern"
        },
        "Monthly Time Series": {
            "2023-11-30": bar("145.0000", "158.6000", "144.4500", "158.5600", "88466145"),
            "2023-12-29": bar("158.4100", "166.3400", "158.0000", "163.5500", "95433745"),
            "2024-01-05": bar("162.8300", "163.2900", "158.6700", "159.1600", "17493660")
        }
    })
}

pub fn search_document() -> Value {
    json!({
        "bestMatches": [
            {
                "1. symbol": "TSCO.LON",
                "2. name": "Tesco PLC",
                "3. type": "Equity",
                "4. region": "United Kingdom",
                "5. marketOpen": "08:00",
                "6. marketClose": "16:30",
                "7. timezone": "UTC+01",
                "8. currency": "GBX",
                "9. matchScore": "0.7273"
            },
            {
                "1. symbol": "TSCDF",
                "2. name": "Tesco plc",
                "3. type": "Equity",
                "4. region": "United States",
                "5. marketOpen": "09:30",
                "6. marketClose": "16:00",
                "7. timezone": "UTC-04",
                "8. currency": "USD",
                "9. matchScore": "0.7143"
            }
        ]
    })
}

pub fn overview_document() -> Value {
    json!({
        "Symbol": "IBM",
        "AssetType": "Common Stock",
        "Name": "International Business Machines",
        "Description": "International Business Machines Corporation (IBM) is an American multinational technology company.",
        "CIK": "51143",
        "Exchange": "NYSE",
        "Currency": "USD",
        "Country": "USA",
        "Sector": "TECHNOLOGY",
        "Industry": "COMPUTER & OFFICE EQUIPMENT",
        "Address": "1 NEW ORCHARD ROAD, ARMONK, NY, US",
        "OfficialSite": "https://www.ibm.com",
        "FiscalYearEnd": "December",
        "LatestQuarter": "2023-09-30",
        "MarketCapitalization": "146332369000",
        "EBITDA": "12644000000",
        "PERatio": "22.05",
        "PEGRatio": "3.925",
        "BookValue": "24.46",
        "DividendPerShare": "6.62",
        "DividendYield": "0.0416",
        "EPS": "7.26",
        "RevenuePerShareTTM": "67.5",
        "ProfitMargin": "0.109",
        "OperatingMarginTTM": "0.138",
        "ReturnOnAssetsTTM": "0.0448",
        "ReturnOnEquityTTM": "0.313",
        "RevenueTTM": "61172998000",
        "GrossProfitTTM": "32688000000",
        "DilutedEPSTTM": "7.26",
        "QuarterlyEarningsGrowthYOY": "1.115",
        "QuarterlyRevenueGrowthYOY": "0.046",
        "AnalystTargetPrice": "150.66",
        "TrailingPE": "22.05",
        "ForwardPE": "15.97",
        "PriceToSalesRatioTTM": "2.392",
        "PriceToBookRatio": "6.62",
        "EVToRevenue": "3.272",
        "EVToEBITDA": "12.36",
        "Beta": "0.739",
        "52WeekHigh": "166.34",
        "52WeekLow": "118.81",
        "50DayMovingAverage": "155.76",
        "200DayMovingAverage": "140.8",
        "SharesOutstanding": "913063000",
        "DividendDate": "2023-12-09",
        "ExDividendDate": "2023-11-09"
    })
}
