use crate::parser::Assignment;

/// Build an [`Assignment`] from string slices.
pub fn assignment(name: &str, value: &str) -> Assignment {
	Assignment {
		name: name.into(),
		value: value.into(),
	}
}

/// A minimal model file: plain constants, an equation-defined stock, a
/// subscripted constant family with separate element equations, and a
/// compact-form subscripted constant.
pub fn sample_model() -> &'static str {
	r"{UTF-8}
initial population = 1000
	~	Person
	~	Starting stock.
	|

growth rate = 0.02
	~	1/Year
	~	|

population = INTEG(growth rate * population, initial population)
	~	Person
	~	|

capacity[Region1] = 500
	~	Person
	~	|

capacity[Region2] = 700
	~	Person
	~	|

share[Region] = 0.4,0.6
	~	Dmnl
	~	|
"
}

/// A calibration output file for [`sample_model`]: control lines, a bounded
/// optimization result, and plain assignments.
pub fn sample_out() -> &'static str {
	r":OPTIMIZE
:C best payoff = -1234.5
0.01 <= growth rate = 0.025 <= 0.1
initial population = 1200
capacity[Region1] = 550
capacity[Region2] = 750
"
}
