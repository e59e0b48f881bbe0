//! Embedded sample tables used when no input files are available.

pub const SALES_CSV: &str = "\
date,product,revenue,profit,quantity
2024-01-12,Widget,1200.0,300.0,12
2024-02-09,Gadget,1500.0,420.0,10
2024-03-15,Widget,1800.0,510.0,18
";

pub const CUSTOMERS_CSV: &str = "\
customer_id,segment,clv,churn_flag,join_date
C001,Enterprise,5400.0,0,2023-04-02
C002,SMB,1250.0,1,2023-07-19
C003,Consumer,310.0,0,2023-11-05
";

pub const COMPETITORS_CSV: &str = "\
date,competitor_sales
2024-01-31,980.0
2024-02-29,1110.0
2024-03-31,1390.0
";
