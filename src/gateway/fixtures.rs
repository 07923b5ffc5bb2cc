//! Canned gateway responses for offline test mode

use super::message::MessageKind;

/// Successful `GenerateRequest` response carrying the hosted payment page URI
pub const INITIAL_RESPONSE_FIXTURE: &str = r#"<Request valid="1"><URI>https://www.paymentexpress.com/pxpay/pxpay.aspx?userid=TestAccount&amp;request=e88cd9f2f6f301c712ae2106ab2b6137d86e954d2163d1042f73cce130b2c 88c06daaa226629644dc741b16deb77ca14ce4c59db84929eb0280837b92bd2ffec 2fae0b9173c066dab48a0b6d2c0f1006d4d26a8c75269196cc540451030958d257c1 86f587ad92cfa7472b101ef72e45cda3bf905862c2bf58fc214870292d6646f7c4ad 02a75e42fc64839fc50cea8c17f65c6a9b83b9c124e2f20844b63538e13a8cff17ec d8f165aee525632fd3661b591626f5fb77725ade21648fed94553f43bfa69acf3557 0ff8fdcbaf8a13a3fa7deb244017e41749e652a3549a5dbe20c6c3a7a66aa5901e3f 87150f7fc</URI></Request>"#;

/// Successful `ProcessResponse` response with settlement details
pub const RETURN_RESPONSE_FIXTURE: &str = r#"<Response valid="1"><Success>1</Success><TxnType>Purchase</TxnType><CurrencyInput>NZD</CurrencyInput><MerchantReference>Test Transaction</MerchantReference><TxnData1>28 Grange Rd</TxnData1><TxnData2>Auckland</TxnData2><TxnData3>NZ</TxnData3><AuthCode>053646</AuthCode><CardName>Visa</CardName><CurrencyName>NZD</CurrencyName><TxnId>123456789</TxnId><EmailAddress></EmailAddress><DpsTxnRef>000000040119429b</DpsTxnRef><BillingId></BillingId><DpsBillingId></DpsBillingId><CardHolderName>TEST</CardHolderName><AmountSettlement>2.06</AmountSettlement><CurrencySettlement>NZD</CurrencySettlement><ResponseText>APPROVED</ResponseText></Response>"#;

/// Fixture for a message kind, if there is one
pub fn fixture_for(kind: MessageKind) -> Option<&'static str> {
    match kind {
        MessageKind::Initial => Some(INITIAL_RESPONSE_FIXTURE),
        MessageKind::Return => Some(RETURN_RESPONSE_FIXTURE),
        MessageKind::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_mapping() {
        assert_eq!(fixture_for(MessageKind::Initial), Some(INITIAL_RESPONSE_FIXTURE));
        assert_eq!(fixture_for(MessageKind::Return), Some(RETURN_RESPONSE_FIXTURE));
        assert_eq!(fixture_for(MessageKind::Other), None);
    }

    #[test]
    fn test_fixture_shapes() {
        assert!(INITIAL_RESPONSE_FIXTURE.starts_with(r#"<Request valid="1"><URI>"#));
        assert!(INITIAL_RESPONSE_FIXTURE.ends_with("87150f7fc</URI></Request>"));
        assert!(RETURN_RESPONSE_FIXTURE.contains("<DpsTxnRef>000000040119429b</DpsTxnRef>"));
        assert!(RETURN_RESPONSE_FIXTURE.ends_with("<ResponseText>APPROVED</ResponseText></Response>"));
    }
}
